//! Types for implied volatility calculation.

use crate::pricing::black_scholes::BlackScholes;
use crate::pricing::error::PricingError;
use crate::pricing::types::{ModelInputs, OptionType};
use serde::{Deserialize, Serialize};

/// Parameters for IV calculation: the model inputs minus volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVParams {
    /// Underlying spot price in price units.
    pub spot: f64,
    /// Option strike price in price units.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.05 for 5%).
    pub risk_free_rate: f64,
    /// Option type (Call or Put).
    pub option_type: OptionType,
}

impl IVParams {
    /// Creates new IV parameters.
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Drops the volatility from full model inputs.
    #[must_use]
    pub fn from_inputs(inputs: &ModelInputs, option_type: OptionType) -> Self {
        Self::new(
            inputs.spot,
            inputs.strike,
            inputs.time_to_expiry,
            inputs.risk_free_rate,
            option_type,
        )
    }

    /// Full model inputs at the given volatility.
    #[must_use]
    pub fn with_volatility(&self, volatility: f64) -> ModelInputs {
        ModelInputs {
            spot: self.spot,
            strike: self.strike,
            time_to_expiry: self.time_to_expiry,
            volatility,
            risk_free_rate: self.risk_free_rate,
        }
    }

    /// Achievable price band `(lower, upper)` for this contract.
    #[must_use]
    pub fn price_bounds(&self) -> (f64, f64) {
        BlackScholes::price_bounds(
            self.spot,
            self.strike,
            self.time_to_expiry,
            self.risk_free_rate,
            self.option_type,
        )
    }
}

/// Why a solve did not converge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IVFailure {
    /// Observed price outside the achievable band; detected before iterating.
    NoSolution {
        /// Lowest achievable price.
        lower_bound: f64,
        /// Highest achievable price.
        upper_bound: f64,
    },
    /// Iteration cap reached without meeting the tolerance.
    NonConvergence,
}

/// Result of an implied volatility solve.
///
/// Non-convergence is reported here rather than as an error so that a scan
/// over many quotes can skip the unsolvable rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVResult {
    /// Implied volatility, or the best iterate when not converged (0.0 for no solution).
    pub volatility: f64,
    /// Whether the tolerance was met.
    pub converged: bool,
    /// Number of pricing iterations performed.
    pub iterations: u32,
    /// Final pricing error `price(volatility) - observed`.
    pub residual: f64,
    /// Observed price the solve targeted.
    pub observed_price: f64,
    /// Failure reason when `converged` is false.
    pub failure: Option<IVFailure>,
}

impl IVResult {
    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn volatility_percent(&self) -> f64 {
        self.volatility * 100.0
    }

    /// Converts into the volatility, mapping failures to errors.
    ///
    /// # Errors
    /// [`PricingError::NoSolution`] or [`PricingError::NonConvergence`].
    pub fn into_volatility(self) -> Result<f64, PricingError> {
        match self.failure {
            None if self.converged => Ok(self.volatility),
            Some(IVFailure::NoSolution {
                lower_bound,
                upper_bound,
            }) => Err(PricingError::NoSolution {
                price: self.observed_price,
                lower_bound,
                upper_bound,
            }),
            _ => Err(PricingError::NonConvergence {
                iterations: self.iterations,
                last_volatility: self.volatility,
                residual: self.residual,
            }),
        }
    }
}
