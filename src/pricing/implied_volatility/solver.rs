//! Safeguarded Newton-Raphson solver for implied volatility.
//!
//! Finds the volatility that makes the Black-Scholes price equal to the
//! observed market price. Each Newton step is checked against a shrinking
//! bracket `[lo, hi]`; steps that leave it, or that would divide by a
//! vanishing vega, are replaced by a bisection step. Price is strictly
//! increasing in volatility, so the bracket always contains the root.

use super::types::{IVFailure, IVParams, IVResult};
use crate::pricing::black_scholes::BlackScholes;
use crate::pricing::error::PricingError;
use crate::pricing::types::require_positive;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Configuration for the implied volatility solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on the volatility step and on the price error.
    ///
    /// For observed prices below 1.0 the price error is measured relative to
    /// the observed price, so near-zero quotes are not matched by any
    /// volatility that prices to roughly zero.
    pub tolerance: f64,
    /// Fixed starting volatility. `None` uses a Brenner-Subrahmanyam estimate.
    pub initial_guess: Option<f64>,
    /// Lower end of the volatility bracket (default: 1e-6).
    pub min_volatility: f64,
    /// Upper end of the volatility bracket (default: 5.0 = 500%).
    pub max_volatility: f64,
    /// Vega below which Newton steps are replaced by bisection.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-8,
            initial_guess: None,
            min_volatility: 1e-6,
            max_volatility: 5.0,
            min_vega: 1e-10,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets a fixed initial volatility guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = Some(initial_guess);
        self
    }

    /// Sets the volatility bracket.
    #[must_use]
    pub fn with_bounds(mut self, min_volatility: f64, max_volatility: f64) -> Self {
        self.min_volatility = min_volatility;
        self.max_volatility = max_volatility;
        self
    }

    fn validate(&self) -> Result<(), PricingError> {
        if self.max_iterations == 0 {
            return Err(PricingError::invalid_input("max_iterations", 0.0));
        }
        require_positive("tolerance", self.tolerance)?;
        require_positive("min_volatility", self.min_volatility)?;
        require_positive("max_volatility", self.max_volatility)?;
        if self.max_volatility <= self.min_volatility {
            return Err(PricingError::invalid_input(
                "max_volatility",
                self.max_volatility,
            ));
        }
        if self.min_vega.is_nan() || self.min_vega < 0.0 {
            return Err(PricingError::invalid_input("min_vega", self.min_vega));
        }
        Ok(())
    }
}

fn validate_params(params: &IVParams, observed_price: f64) -> Result<(), PricingError> {
    require_positive("spot", params.spot)?;
    require_positive("strike", params.strike)?;
    require_positive("time_to_expiry", params.time_to_expiry)?;
    if !params.risk_free_rate.is_finite() {
        return Err(PricingError::invalid_input(
            "risk_free_rate",
            params.risk_free_rate,
        ));
    }
    require_positive("observed_price", observed_price)
}

/// Starting point from the Brenner-Subrahmanyam ATM approximation.
///
/// σ ≈ time value / (0.4 · S · √T), clamped to a sane range.
fn smart_initial_guess(params: &IVParams, observed_price: f64, lower_bound: f64) -> f64 {
    let time_value = (observed_price - lower_bound).max(0.0);
    let approx = time_value / (0.4 * params.spot * params.time_to_expiry.sqrt());
    approx.clamp(0.05, 2.0)
}

/// Allowed price error for an observed price.
fn price_tolerance(config: &SolverConfig, observed_price: f64) -> f64 {
    config.tolerance * observed_price.min(1.0)
}

fn no_solution(observed_price: f64, lower_bound: f64, upper_bound: f64) -> IVResult {
    let nearest = observed_price.clamp(lower_bound, upper_bound);
    IVResult {
        volatility: 0.0,
        converged: false,
        iterations: 0,
        residual: nearest - observed_price,
        observed_price,
        failure: Some(IVFailure::NoSolution {
            lower_bound,
            upper_bound,
        }),
    }
}

fn converged(volatility: f64, iterations: u32, residual: f64, observed_price: f64) -> IVResult {
    debug!(
        "implied volatility {:.6} after {} iterations (residual {:.3e})",
        volatility, iterations, residual
    );
    IVResult {
        volatility,
        converged: true,
        iterations,
        residual,
        observed_price,
        failure: None,
    }
}

/// Solves for implied volatility.
///
/// Out-of-range prices are detected before iterating and returned with
/// `converged == false`, `iterations == 0` and [`IVFailure::NoSolution`].
/// Reaching `max_iterations` returns the best iterate with
/// [`IVFailure::NonConvergence`].
///
/// # Arguments
/// - `params`: Option parameters (spot, strike, time, rate, type)
/// - `observed_price`: Observed market price to match
/// - `config`: Solver configuration
///
/// # Errors
/// [`PricingError::InvalidInput`] if the contract, the observed price or the
/// configuration is outside its domain.
///
/// # Example
/// ```
/// use pnl_surface_rs::prelude::*;
///
/// let params = IVParams::call(100.0, 100.0, 0.25, 0.05);
/// let result = solve_iv(&params, 5.0, &SolverConfig::default()).unwrap();
/// assert!(result.converged);
/// ```
pub fn solve_iv(
    params: &IVParams,
    observed_price: f64,
    config: &SolverConfig,
) -> Result<IVResult, PricingError> {
    validate_params(params, observed_price)?;
    config.validate()?;

    let (lower_bound, upper_bound) = params.price_bounds();
    if observed_price < lower_bound || observed_price >= upper_bound {
        debug!(
            "price {} outside no-arbitrage band [{}, {}]",
            observed_price, lower_bound, upper_bound
        );
        return Ok(no_solution(observed_price, lower_bound, upper_bound));
    }

    let mut lo = config.min_volatility;
    let mut hi = config.max_volatility;
    let price_at = |vol: f64| {
        BlackScholes::price_and_vega(&params.with_volatility(vol), params.option_type)
    };

    // The band is wider than the bracket can reach at its ends
    let price_tol = price_tolerance(config, observed_price);
    let (price_lo, _) = price_at(lo)?;
    if (price_lo - observed_price).abs() < price_tol {
        return Ok(converged(lo, 1, price_lo - observed_price, observed_price));
    }
    let (price_hi, _) = price_at(hi)?;
    if (price_hi - observed_price).abs() < price_tol {
        return Ok(converged(hi, 1, price_hi - observed_price, observed_price));
    }
    if observed_price < price_lo || observed_price > price_hi {
        debug!(
            "price {} outside bracket prices [{}, {}]",
            observed_price, price_lo, price_hi
        );
        return Ok(no_solution(observed_price, price_lo, price_hi));
    }

    let mut vol = config
        .initial_guess
        .unwrap_or_else(|| smart_initial_guess(params, observed_price, lower_bound))
        .clamp(lo, hi);
    let mut best_vol = vol;
    let mut best_residual = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let (price, vega) = price_at(vol)?;
        let diff = price - observed_price;
        trace!(
            "iteration {}: vol={:.8} diff={:.3e} vega={:.4} bracket=[{:.8}, {:.8}]",
            iteration, vol, diff, vega, lo, hi
        );

        if diff.abs() < best_residual.abs() {
            best_vol = vol;
            best_residual = diff;
        }

        if diff.abs() < price_tol {
            return Ok(converged(vol, iteration, diff, observed_price));
        }

        if diff > 0.0 {
            hi = vol;
        } else {
            lo = vol;
        }

        let next = match (vega > config.min_vega).then(|| vol - diff / vega) {
            Some(candidate) if candidate > lo && candidate < hi => candidate,
            _ => 0.5 * (lo + hi),
        };
        let step = (next - vol).abs();
        vol = next;

        if step < config.tolerance {
            let (price, _) = price_at(vol)?;
            return Ok(converged(vol, iteration, price - observed_price, observed_price));
        }
    }

    warn!(
        "implied volatility did not converge after {} iterations: best vol {:.6}, residual {:.3e}",
        config.max_iterations, best_vol, best_residual
    );
    Ok(IVResult {
        volatility: best_vol,
        converged: false,
        iterations: config.max_iterations,
        residual: best_residual,
        observed_price,
        failure: Some(IVFailure::NonConvergence),
    })
}
