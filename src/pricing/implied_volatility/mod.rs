//! Implied volatility from observed option prices.
//!
//! Implied Volatility (IV) is the option's price translated into different
//! units: the volatility that, fed into Black-Scholes, reproduces the
//! observed premium.
//!
//! # Solver contract
//!
//! [`solve_iv`] runs a Newton-Raphson iteration on `σ ↦ price(σ) − observed`
//! using vega as the derivative, guarded by a bisection bracket
//! (`[1e-6, 5.0]` by default). It stops when the price error or the
//! volatility step drops below the tolerance, and never runs more than
//! `max_iterations` pricings.
//!
//! Prices outside the no-arbitrage band are rejected before iterating. Both
//! that case and an exhausted iteration cap come back as an [`IVResult`] with
//! `converged == false`, so a scan across an options chain can skip those
//! rows and carry on.
//!
//! # Example
//!
//! ```
//! use pnl_surface_rs::prelude::*;
//!
//! let params = IVParams::call(100.0, 105.0, 0.25, 0.05);
//! let result = solve_iv(&params, 2.4779, &SolverConfig::default()).unwrap();
//! assert!(result.converged);
//! assert!((result.volatility - 0.20).abs() < 1e-4);
//! ```

mod solver;
mod types;

pub use solver::{SolverConfig, solve_iv};
pub use types::{IVFailure, IVParams, IVResult};
