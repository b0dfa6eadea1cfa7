//! # pnl-surface-rs
//!
//! European option pricing under Black-Scholes, with closed-form Greeks, a
//! safeguarded implied volatility solver and profit-and-loss surfaces over a
//! grid of spot prices and volatilities.
//!
//! ## Modules
//!
//! - [`pricing`]: the pricing engine ([`pricing::BlackScholes`]), the
//!   standard normal distribution, the error taxonomy and the implied
//!   volatility solver ([`pricing::solve_iv`]).
//! - [`surface`]: axes, metrics and the surface generator that evaluates the
//!   engine over spot × volatility scenarios, plus a heat map axis builder.
//! - [`portfolio`]: quantity-weighted valuation of several positions.
//! - [`chain`]: implied volatility scan over an options chain supplied by a
//!   market data source.
//! - [`snapshot`]: serializable calculation records and checksummed packages
//!   for a storage layer.
//!
//! All computations are pure and synchronous. The library emits `tracing`
//! events but never installs a subscriber.
//!
//! ## Example
//!
//! ```
//! use pnl_surface_rs::prelude::*;
//!
//! let inputs = ModelInputs::new(100.0, 105.0, 0.25, 0.20, 0.05).unwrap();
//! let result = BlackScholes::price(&inputs).unwrap();
//! assert!((result.call_price - 2.4779).abs() < 1e-4);
//!
//! let config = HeatmapConfig::default().with_grid_size(10);
//! let (spots, vols) = config.axes(&inputs).unwrap();
//! let surfaces = generate_surfaces(
//!     &inputs,
//!     &spots,
//!     &vols,
//!     MetricSet::PNL,
//!     PurchaseCosts::new(2.0, 6.0),
//!     OptionType::Call,
//! )
//! .unwrap();
//! assert_eq!(surfaces.len(), 2);
//! assert_eq!(surfaces[0].dimensions(), (10, 10));
//! ```
//!
//! ## Features
//!
//! - `parallel`: enables `generate_surfaces_par`, which evaluates surface rows
//!   on the rayon thread pool.

pub mod chain;
pub mod portfolio;
pub mod pricing;
pub mod snapshot;
pub mod surface;
mod utils;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::chain::{
        ChainQuote, ChainRow, ChainScanConfig, ChainScanSummary, scan_chain,
    };
    pub use crate::portfolio::{
        Portfolio, PortfolioGreeks, PortfolioHeatmaps, PortfolioValuation, Position,
        PositionValuation,
    };
    pub use crate::pricing::{
        BlackScholes, ErrorKind, Greeks, IVFailure, IVParams, IVResult, ModelInputs, OptionType,
        PricingError, PricingResult, SolverConfig, norm_cdf, norm_pdf, solve_iv,
    };
    pub use crate::snapshot::{
        CALCULATION_SNAPSHOT_FORMAT_VERSION, CalculationRecord, CalculationSnapshot,
        CalculationSnapshotPackage, PnlRow,
    };
    #[cfg(feature = "parallel")]
    pub use crate::surface::generate_surfaces_par;
    pub use crate::surface::{
        AxisMetric, AxisRange, HeatmapConfig, MetricSet, PurchaseCosts, Surface, SurfaceAxis,
        SurfaceMetric, generate_surface, generate_surfaces, linspace,
    };
}
