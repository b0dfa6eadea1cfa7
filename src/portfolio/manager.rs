/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Portfolio of option positions.
//!
//! This module provides the `Portfolio` struct, which owns a list of
//! positions and produces their valuation and the heat maps of the first
//! position.

use super::position::Position;
use super::valuation::PortfolioValuation;
use crate::pricing::error::PricingError;
use crate::pricing::types::OptionType;
use crate::surface::axis::HeatmapConfig;
use crate::surface::generator::{assemble, price_grid};
use crate::surface::metric::{PurchaseCosts, SurfaceMetric};
use crate::surface::types::Surface;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Heat maps of the first position in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHeatmaps {
    /// Call P&L surface.
    pub call_pnl: Surface,
    /// Put P&L surface.
    pub put_pnl: Surface,
    /// Call delta surface.
    pub call_delta: Surface,
    /// Put delta surface.
    pub put_delta: Surface,
    /// Gamma surface.
    pub gamma: Surface,
    /// Vega surface.
    pub vega: Surface,
}

fn take_next(surfaces: &mut impl Iterator<Item = Surface>) -> Result<Surface, PricingError> {
    surfaces.next().ok_or_else(|| PricingError::InvalidOperation {
        message: "missing heat map surface".to_string(),
    })
}

/// Ordered collection of positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Create an empty portfolio.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Add a validated position, returning its index.
    pub fn add_position(&mut self, position: Position) -> Result<usize, PricingError> {
        position.validate()?;
        self.positions.push(position);
        let index = self.positions.len() - 1;
        info!("Added position {} (quantity {})", index, position.quantity);
        Ok(index)
    }

    /// Add an at-the-money default position, returning its index.
    pub fn add_default_position(&mut self) -> usize {
        self.positions.push(Position::default());
        let index = self.positions.len() - 1;
        info!("Added default position {}", index);
        index
    }

    /// Replace the position at `index`.
    pub fn update_position(&mut self, index: usize, position: Position) -> Result<(), PricingError> {
        position.validate()?;
        let slot = self
            .positions
            .get_mut(index)
            .ok_or_else(|| PricingError::InvalidOperation {
                message: format!("no position at index {index}"),
            })?;
        *slot = position;
        Ok(())
    }

    /// Get a position by index.
    pub fn get_position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    /// Remove the position at `index`.
    pub fn remove_position(&mut self, index: usize) -> Option<Position> {
        if index >= self.positions.len() {
            return None;
        }
        let removed = self.positions.remove(index);
        info!("Removed position {}", index);
        Some(removed)
    }

    /// All positions in insertion order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no positions are held.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Value every position against the given purchase prices.
    pub fn valuate(&self, purchase: PurchaseCosts) -> Result<PortfolioValuation, PricingError> {
        PortfolioValuation::evaluate(&self.positions, purchase)
    }

    /// P&L and Greek heat maps around the first position.
    pub fn heatmaps(
        &self,
        purchase: PurchaseCosts,
        config: &HeatmapConfig,
    ) -> Result<PortfolioHeatmaps, PricingError> {
        let first = self
            .positions
            .first()
            .ok_or_else(|| PricingError::invalid_input("positions", 0.0))?;
        let base = &first.inputs;
        let (x_axis, y_axis) = config.axes(base)?;
        purchase.validate()?;

        // One pricing pass; call and put surfaces are read from the same grid
        let grid = price_grid(base, &x_axis, &y_axis)?;
        let call_metrics = [
            SurfaceMetric::CallPL,
            SurfaceMetric::PutPL,
            SurfaceMetric::Delta,
            SurfaceMetric::Gamma,
            SurfaceMetric::Vega,
        ];
        let mut call_side = assemble(
            &x_axis,
            &y_axis,
            &grid,
            &call_metrics,
            &purchase,
            OptionType::Call,
        )?
        .into_iter();
        let mut put_side = assemble(
            &x_axis,
            &y_axis,
            &grid,
            &[SurfaceMetric::Delta],
            &purchase,
            OptionType::Put,
        )?
        .into_iter();

        let call_pnl = take_next(&mut call_side)?;
        let put_pnl = take_next(&mut call_side)?;
        let call_delta = take_next(&mut call_side)?;
        let gamma = take_next(&mut call_side)?;
        let vega = take_next(&mut call_side)?;
        let put_delta = take_next(&mut put_side)?;

        Ok(PortfolioHeatmaps {
            call_pnl,
            put_pnl,
            call_delta,
            put_delta,
            gamma,
            vega,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::types::ModelInputs;
    use crate::surface::generator::generate_surfaces;
    use crate::surface::metric::MetricSet;

    #[test]
    fn test_add_and_remove_positions() {
        let mut portfolio = Portfolio::new();
        assert!(portfolio.is_empty());

        let first = portfolio.add_default_position();
        let inputs = ModelInputs::new(120.0, 110.0, 0.5, 0.3, 0.02).unwrap();
        let second = portfolio
            .add_position(Position::new(inputs, 2).unwrap())
            .unwrap();
        assert_eq!((first, second), (0, 1));
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.get_position(1).map(|p| p.quantity), Some(2));

        let removed = portfolio.remove_position(0).unwrap();
        assert_eq!(removed, Position::default());
        assert_eq!(portfolio.len(), 1);
        assert!(portfolio.remove_position(5).is_none());
    }

    #[test]
    fn test_invalid_position_not_added() {
        let mut portfolio = Portfolio::new();
        let position = Position {
            quantity: 0,
            ..Position::default()
        };
        assert!(portfolio.add_position(position).is_err());
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_update_position() {
        let mut portfolio = Portfolio::new();
        portfolio.add_default_position();
        let updated = Position {
            quantity: 4,
            ..Position::default()
        };
        portfolio.update_position(0, updated).unwrap();
        assert_eq!(portfolio.positions()[0].quantity, 4);
        assert!(matches!(
            portfolio.update_position(3, updated),
            Err(PricingError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_heatmaps_for_first_position() {
        let mut portfolio = Portfolio::new();
        portfolio.add_default_position();
        let config = HeatmapConfig::default().with_grid_size(6);

        let maps = portfolio
            .heatmaps(PurchaseCosts::new(5.0, 3.0), &config)
            .unwrap();

        assert_eq!(maps.call_pnl.metric(), SurfaceMetric::CallPL);
        assert_eq!(maps.put_pnl.metric(), SurfaceMetric::PutPL);
        assert_eq!(maps.call_delta.metric(), SurfaceMetric::Delta);
        assert_eq!(maps.put_delta.metric(), SurfaceMetric::Delta);
        assert_eq!(maps.gamma.metric(), SurfaceMetric::Gamma);
        assert_eq!(maps.vega.metric(), SurfaceMetric::Vega);
        assert_eq!(maps.call_pnl.dimensions(), (6, 6));

        for (call, put) in maps
            .call_delta
            .cells()
            .iter()
            .flatten()
            .zip(maps.put_delta.cells().iter().flatten())
        {
            assert!((call - put - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_heatmaps_need_a_position() {
        let portfolio = Portfolio::new();
        let result = portfolio.heatmaps(PurchaseCosts::default(), &HeatmapConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_heatmaps_match_separate_generation() {
        let mut portfolio = Portfolio::new();
        portfolio.add_default_position();
        let config = HeatmapConfig::default().with_grid_size(5);
        let purchase = PurchaseCosts::new(5.0, 3.0);
        let base = Position::default().inputs;
        let (x, y) = config.axes(&base).unwrap();

        let maps = portfolio.heatmaps(purchase, &config).unwrap();

        let call = generate_surfaces(
            &base,
            &x,
            &y,
            MetricSet::PNL | MetricSet::DELTA | MetricSet::GAMMA | MetricSet::VEGA,
            purchase,
            OptionType::Call,
        )
        .unwrap();
        let put = generate_surfaces(&base, &x, &y, MetricSet::DELTA, purchase, OptionType::Put)
            .unwrap();
        assert_eq!(maps.call_pnl, call[0]);
        assert_eq!(maps.put_pnl, call[1]);
        assert_eq!(maps.call_delta, call[2]);
        assert_eq!(maps.gamma, call[3]);
        assert_eq!(maps.vega, call[4]);
        assert_eq!(maps.put_delta, put[0]);
    }

    #[test]
    fn test_heatmaps_reject_negative_purchase() {
        let mut portfolio = Portfolio::new();
        portfolio.add_default_position();
        let result = portfolio.heatmaps(PurchaseCosts::new(-1.0, 3.0), &HeatmapConfig::default());
        assert!(matches!(result, Err(PricingError::InvalidInput { .. })));
    }
}
