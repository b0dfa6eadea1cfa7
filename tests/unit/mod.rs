mod chain_tests;
mod pricing_tests;
mod snapshot_tests;
mod solver_tests;
mod surface_tests;
