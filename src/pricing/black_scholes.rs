//! Black-Scholes pricing model and Greeks calculation.
//!
//! Closed-form European call/put prices and the five standard sensitivities.
//! Every entry point validates its inputs and fails with
//! [`PricingError::InvalidInput`] instead of returning NaN or infinity.

use super::distribution::{norm_cdf, norm_pdf};
use super::error::PricingError;
use super::types::{Greeks, ModelInputs, OptionType, PricingResult};
use tracing::trace;

/// Black-Scholes pricing model implementation.
///
/// Provides methods for calculating option prices and Greeks
/// using the Black-Scholes-Merton formula.
pub struct BlackScholes;

/// Shared intermediate values for one evaluation.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_time: f64,
    discount: f64,
}

impl BlackScholes {
    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    ///
    /// Unchecked: callers must pass positive `spot`, `strike`, `time`, `vol`.
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    fn terms(inputs: &ModelInputs) -> Result<Terms, PricingError> {
        inputs.validate()?;

        let sqrt_time = inputs.time_to_expiry.sqrt();
        let d1 = Self::d1(
            inputs.spot,
            inputs.strike,
            inputs.risk_free_rate,
            inputs.time_to_expiry,
            inputs.volatility,
        );
        let d2 = Self::d2(d1, inputs.volatility, inputs.time_to_expiry);
        let discount = inputs.discount_factor();

        if !d1.is_finite() || !d2.is_finite() {
            return Err(PricingError::NumericDomain {
                message: format!("d1/d2 not finite (d1={d1}, d2={d2})"),
            });
        }
        if !discount.is_finite() {
            return Err(PricingError::NumericDomain {
                message: format!(
                    "discount factor not finite for rate {} over {} years",
                    inputs.risk_free_rate, inputs.time_to_expiry
                ),
            });
        }

        Ok(Terms {
            d1,
            d2,
            sqrt_time,
            discount,
        })
    }

    /// Prices both the call and the put and computes their Greeks.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for S, K, T, σ ≤ 0 or non-finite inputs,
    /// [`PricingError::NumericDomain`] if d1/d2 overflow.
    pub fn price(inputs: &ModelInputs) -> Result<PricingResult, PricingError> {
        let Terms {
            d1,
            d2,
            sqrt_time,
            discount,
        } = Self::terms(inputs)?;

        let spot = inputs.spot;
        let strike = inputs.strike;
        let vol = inputs.volatility;
        let rate = inputs.risk_free_rate;
        let time = inputs.time_to_expiry;

        let n_d1 = norm_cdf(d1);
        let n_d2 = norm_cdf(d2);
        let n_neg_d1 = norm_cdf(-d1);
        let n_neg_d2 = norm_cdf(-d2);
        let pdf_d1 = norm_pdf(d1);
        let strike_pv = strike * discount;

        let call_price = spot * n_d1 - strike_pv * n_d2;
        let put_price = strike_pv * n_neg_d2 - spot * n_neg_d1;

        // Shared between call and put
        let gamma = pdf_d1 / (spot * vol * sqrt_time);
        let vega = spot * pdf_d1 * sqrt_time;
        let decay = -spot * pdf_d1 * vol / (2.0 * sqrt_time);

        let call_greeks = Greeks {
            delta: n_d1,
            gamma,
            theta: decay - rate * strike_pv * n_d2,
            vega,
            rho: strike * time * discount * n_d2,
        };
        let put_greeks = Greeks {
            delta: n_d1 - 1.0,
            gamma,
            theta: decay + rate * strike_pv * n_neg_d2,
            vega,
            rho: -strike * time * discount * n_neg_d2,
        };

        trace!(
            "priced S={} K={} T={} vol={} r={}: call={:.6} put={:.6}",
            spot, strike, time, vol, rate, call_price, put_price
        );

        Ok(PricingResult {
            call_price,
            put_price,
            d1,
            d2,
            call_greeks,
            put_greeks,
        })
    }

    /// Price of a single option type, skipping the Greeks.
    ///
    /// # Errors
    /// Same as [`BlackScholes::price`].
    pub fn option_price(inputs: &ModelInputs, option_type: OptionType) -> Result<f64, PricingError> {
        Self::price_and_vega(inputs, option_type).map(|(price, _)| price)
    }

    /// Price of one option type together with vega (∂price/∂σ).
    ///
    /// Vega = S · N'(d1) · √T, identical for calls and puts. This is the
    /// derivative the implied volatility solver needs on every step.
    ///
    /// # Errors
    /// Same as [`BlackScholes::price`].
    pub fn price_and_vega(
        inputs: &ModelInputs,
        option_type: OptionType,
    ) -> Result<(f64, f64), PricingError> {
        let Terms {
            d1,
            d2,
            sqrt_time,
            discount,
        } = Self::terms(inputs)?;

        let strike_pv = inputs.strike * discount;
        let price = match option_type {
            OptionType::Call => inputs.spot * norm_cdf(d1) - strike_pv * norm_cdf(d2),
            OptionType::Put => strike_pv * norm_cdf(-d2) - inputs.spot * norm_cdf(-d1),
        };
        let vega = inputs.spot * norm_pdf(d1) * sqrt_time;

        Ok((price, vega))
    }

    /// Model-free price band for a European option.
    ///
    /// Lower bound is the discounted intrinsic value (the σ→0 limit), upper
    /// bound is S for calls and K·e^(-rT) for puts (the σ→∞ limit).
    #[must_use]
    pub fn price_bounds(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> (f64, f64) {
        let strike_pv = strike * (-risk_free_rate * time_to_expiry).exp();
        match option_type {
            OptionType::Call => ((spot - strike_pv).max(0.0), spot),
            OptionType::Put => ((strike_pv - spot).max(0.0), strike_pv),
        }
    }
}
