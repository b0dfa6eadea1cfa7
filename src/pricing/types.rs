//! Value types shared by the pricing engine, solver and surface generator.

use super::error::PricingError;
use serde::{Deserialize, Serialize};

/// European option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

/// The five Black-Scholes model inputs.
///
/// Construct through [`ModelInputs::new`] to get validation up front, or build
/// the struct directly and call [`ModelInputs::validate`] before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelInputs {
    /// Underlying spot price (S).
    pub spot: f64,
    /// Option strike price (K).
    pub strike: f64,
    /// Time to expiration in years (T).
    pub time_to_expiry: f64,
    /// Annualized volatility (σ, e.g. 0.20 for 20%).
    pub volatility: f64,
    /// Annualized continuously compounded risk-free rate (r).
    pub risk_free_rate: f64,
}

impl ModelInputs {
    /// Creates validated model inputs.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if spot, strike, time or
    /// volatility is not strictly positive, or any field is not finite.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> Result<Self, PricingError> {
        let inputs = Self {
            spot,
            strike,
            time_to_expiry,
            volatility,
            risk_free_rate,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Checks the model domain: S, K, T, σ finite and > 0, r finite.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] naming the first failing field.
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("spot", self.spot)?;
        require_positive("strike", self.strike)?;
        require_positive("time_to_expiry", self.time_to_expiry)?;
        require_positive("volatility", self.volatility)?;
        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::invalid_input(
                "risk_free_rate",
                self.risk_free_rate,
            ));
        }
        Ok(())
    }

    /// Returns a copy with a different spot price.
    #[must_use]
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Returns a copy with a different volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Discount factor e^(-rT).
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Undiscounted payoff if exercised now.
    #[must_use]
    pub fn intrinsic_value(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<(), PricingError> {
    // NaN fails the comparison as well
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_input(parameter, value))
    }
}

/// First and second order sensitivities for one option type.
///
/// Stored in raw model units: vega per 1.00 change in volatility, rho per
/// 1.00 change in rate, theta per year. Use the `*_per_point` / `*_per_day`
/// helpers for display scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S².
    pub gamma: f64,
    /// ∂V/∂t, per year.
    pub theta: f64,
    /// ∂V/∂σ, per 1.00 volatility.
    pub vega: f64,
    /// ∂V/∂r, per 1.00 rate.
    pub rho: f64,
}

impl Greeks {
    /// Vega per one volatility point (1%).
    #[must_use]
    pub fn vega_per_point(&self) -> f64 {
        self.vega / 100.0
    }

    /// Rho per one rate point (1%).
    #[must_use]
    pub fn rho_per_point(&self) -> f64 {
        self.rho / 100.0
    }

    /// Theta per calendar day.
    #[must_use]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Scales every sensitivity by `factor` (position size).
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(&self, other: &Greeks) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

/// Full pricing output for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// European call price.
    pub call_price: f64,
    /// European put price.
    pub put_price: f64,
    /// d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T).
    pub d1: f64,
    /// d2 = d1 − σ√T.
    pub d2: f64,
    /// Call sensitivities.
    pub call_greeks: Greeks,
    /// Put sensitivities.
    pub put_greeks: Greeks,
}

impl PricingResult {
    /// Price of the given option type.
    #[must_use]
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }

    /// Greeks of the given option type.
    #[must_use]
    pub fn greeks(&self, option_type: OptionType) -> &Greeks {
        match option_type {
            OptionType::Call => &self.call_greeks,
            OptionType::Put => &self.put_greeks,
        }
    }
}
