//! Quantity-weighted valuation of a list of positions.

use super::position::Position;
use crate::pricing::black_scholes::BlackScholes;
use crate::pricing::error::PricingError;
use crate::pricing::types::{Greeks, PricingResult};
use crate::surface::metric::PurchaseCosts;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-position prices and P&L (per contract).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionValuation {
    /// Zero-based index of the position in the portfolio.
    pub index: usize,
    /// Contracts held.
    pub quantity: u32,
    /// Full pricing output for the position's inputs.
    pub pricing: PricingResult,
    /// Call premium minus call purchase price.
    pub call_pnl: f64,
    /// Put premium minus put purchase price.
    pub put_pnl: f64,
}

/// Aggregated Greeks across positions, each weighted by quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioGreeks {
    /// Sum of call Greeks.
    pub call: Greeks,
    /// Sum of put Greeks.
    pub put: Greeks,
}

/// Valuation of a whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    /// One line per position, in portfolio order.
    pub positions: Vec<PositionValuation>,
    /// Σ call P&L × quantity.
    pub total_call_pnl: f64,
    /// Σ put P&L × quantity.
    pub total_put_pnl: f64,
    /// Quantity-weighted Greeks.
    pub greeks: PortfolioGreeks,
}

impl PortfolioValuation {
    /// Prices every position and aggregates P&L and Greeks.
    ///
    /// The same purchase prices apply to every position.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for an empty list, an invalid position or
    /// invalid purchase costs.
    pub fn evaluate(positions: &[Position], purchase: PurchaseCosts) -> Result<Self, PricingError> {
        if positions.is_empty() {
            return Err(PricingError::invalid_input("positions", 0.0));
        }
        purchase.validate()?;

        let mut lines = Vec::with_capacity(positions.len());
        let mut total_call_pnl = 0.0;
        let mut total_put_pnl = 0.0;
        let mut greeks = PortfolioGreeks::default();

        for (index, position) in positions.iter().enumerate() {
            position.validate()?;
            let pricing = BlackScholes::price(&position.inputs)?;
            let quantity = f64::from(position.quantity);

            let call_pnl = pricing.call_price - purchase.call;
            let put_pnl = pricing.put_price - purchase.put;
            total_call_pnl += call_pnl * quantity;
            total_put_pnl += put_pnl * quantity;

            greeks.call = greeks.call.add(&pricing.call_greeks.scale(quantity));
            greeks.put = greeks.put.add(&pricing.put_greeks.scale(quantity));

            lines.push(PositionValuation {
                index,
                quantity: position.quantity,
                pricing,
                call_pnl,
                put_pnl,
            });
        }

        debug!(
            "valued {} positions: call P&L {:.4}, put P&L {:.4}",
            lines.len(),
            total_call_pnl,
            total_put_pnl
        );

        Ok(Self {
            positions: lines,
            total_call_pnl,
            total_put_pnl,
            greeks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::types::ModelInputs;

    const TOLERANCE: f64 = 1e-10;

    fn positions() -> Vec<Position> {
        vec![
            Position::new(ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05).unwrap(), 1).unwrap(),
            Position::new(ModelInputs::new(100.0, 110.0, 0.5, 0.3, 0.05).unwrap(), 3).unwrap(),
        ]
    }

    #[test]
    fn test_totals_are_quantity_weighted() {
        let purchase = PurchaseCosts::new(5.0, 3.0);
        let valuation = PortfolioValuation::evaluate(&positions(), purchase).unwrap();

        assert_eq!(valuation.positions.len(), 2);
        let first = &valuation.positions[0];
        let second = &valuation.positions[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.quantity, 3);
        assert!((first.call_pnl - (first.pricing.call_price - 5.0)).abs() < TOLERANCE);
        assert!((second.put_pnl - (second.pricing.put_price - 3.0)).abs() < TOLERANCE);

        let expected_call = first.call_pnl + 3.0 * second.call_pnl;
        let expected_put = first.put_pnl + 3.0 * second.put_pnl;
        assert!((valuation.total_call_pnl - expected_call).abs() < TOLERANCE);
        assert!((valuation.total_put_pnl - expected_put).abs() < TOLERANCE);
    }

    #[test]
    fn test_greeks_are_quantity_weighted() {
        let valuation =
            PortfolioValuation::evaluate(&positions(), PurchaseCosts::default()).unwrap();
        let first = valuation.positions[0].pricing;
        let second = valuation.positions[1].pricing;

        let delta = first.call_greeks.delta + 3.0 * second.call_greeks.delta;
        let vega = first.call_greeks.vega + 3.0 * second.call_greeks.vega;
        let put_rho = first.put_greeks.rho + 3.0 * second.put_greeks.rho;
        assert!((valuation.greeks.call.delta - delta).abs() < TOLERANCE);
        assert!((valuation.greeks.call.vega - vega).abs() < TOLERANCE);
        assert!((valuation.greeks.put.rho - put_rho).abs() < TOLERANCE);
        assert!((valuation.greeks.call.gamma - valuation.greeks.put.gamma).abs() < TOLERANCE);
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let result = PortfolioValuation::evaluate(&[], PurchaseCosts::default());
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput {
                parameter: "positions",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_position_fails_fast() {
        let mut list = positions();
        list[1].inputs.volatility = -0.1;
        let result = PortfolioValuation::evaluate(&list, PurchaseCosts::default());
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput {
                parameter: "volatility",
                ..
            })
        ));
    }
}
