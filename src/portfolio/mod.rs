//! Multi-position valuation.

/// Portfolio container and heat maps of its first position.
pub mod manager;
pub mod position;
pub mod valuation;

pub use manager::{Portfolio, PortfolioHeatmaps};
pub use position::Position;
pub use valuation::{PortfolioGreeks, PortfolioValuation, PositionValuation};
