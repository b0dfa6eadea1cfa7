//! A single option position.

use crate::pricing::error::PricingError;
use crate::pricing::types::ModelInputs;
use serde::{Deserialize, Serialize};

/// Holding of `quantity` call/put pairs on one set of model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pricing inputs for this position.
    pub inputs: ModelInputs,
    /// Number of contracts held.
    pub quantity: u32,
}

impl Position {
    /// Creates a validated position.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for invalid inputs or a zero quantity.
    pub fn new(inputs: ModelInputs, quantity: u32) -> Result<Self, PricingError> {
        let position = Self { inputs, quantity };
        position.validate()?;
        Ok(position)
    }

    /// Checks the inputs and that at least one contract is held.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] naming the failing field.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.quantity == 0 {
            return Err(PricingError::invalid_input("quantity", 0.0));
        }
        self.inputs.validate()
    }
}

impl Default for Position {
    /// 100 strike at-the-money, three months, 20% vol, 5% rate, one contract.
    fn default() -> Self {
        Self {
            inputs: ModelInputs {
                spot: 100.0,
                strike: 100.0,
                time_to_expiry: 0.25,
                volatility: 0.2,
                risk_free_rate: 0.05,
            },
            quantity: 1,
        }
    }
}
