//! Black-Scholes pricing engine and implied volatility solver.

pub mod black_scholes;
pub mod distribution;
pub mod error;
/// Inversion of the pricing formula for volatility.
pub mod implied_volatility;
pub mod types;

pub use black_scholes::BlackScholes;
pub use distribution::{norm_cdf, norm_pdf};
pub use error::{ErrorKind, PricingError};
pub use implied_volatility::{IVFailure, IVParams, IVResult, SolverConfig, solve_iv};
pub use types::{Greeks, ModelInputs, OptionType, PricingResult};
