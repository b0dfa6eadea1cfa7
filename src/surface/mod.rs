//! Profit/loss and Greek surfaces over spot price × volatility.
//!
//! [`generate_surface`] evaluates the pricing engine on the Cartesian product
//! of a spot axis and a volatility axis and records one metric per cell.
//! [`HeatmapConfig`] derives the axes from a base scenario the way a heat
//! map front end would.

pub mod axis;
pub mod generator;
pub mod metric;
pub mod types;

pub use axis::{AxisRange, HeatmapConfig, linspace};
#[cfg(feature = "parallel")]
pub use generator::generate_surfaces_par;
pub use generator::{generate_surface, generate_surfaces};
pub use metric::{MetricSet, PurchaseCosts, SurfaceMetric};
pub use types::{AxisMetric, Surface, SurfaceAxis};
