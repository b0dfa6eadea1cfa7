//! Metrics a surface can hold.

use crate::pricing::error::PricingError;
use crate::pricing::types::{OptionType, PricingResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single value extracted from a [`PricingResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceMetric {
    /// Call premium.
    CallPrice,
    /// Put premium.
    PutPrice,
    /// Call premium minus the call purchase cost.
    CallPL,
    /// Put premium minus the put purchase cost.
    PutPL,
    /// Delta of the selected option type.
    Delta,
    /// Gamma (same for calls and puts).
    Gamma,
    /// Vega per 1.00 volatility (same for calls and puts).
    Vega,
    /// Theta per year of the selected option type.
    Theta,
    /// Rho per 1.00 rate of the selected option type.
    Rho,
}

impl SurfaceMetric {
    /// Every metric, in the order multi-metric generation returns them.
    pub const ALL: [SurfaceMetric; 9] = [
        SurfaceMetric::CallPrice,
        SurfaceMetric::PutPrice,
        SurfaceMetric::CallPL,
        SurfaceMetric::PutPL,
        SurfaceMetric::Delta,
        SurfaceMetric::Gamma,
        SurfaceMetric::Vega,
        SurfaceMetric::Theta,
        SurfaceMetric::Rho,
    ];

    /// Display name used as the surface's metric name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceMetric::CallPrice => "callPrice",
            SurfaceMetric::PutPrice => "putPrice",
            SurfaceMetric::CallPL => "callPL",
            SurfaceMetric::PutPL => "putPL",
            SurfaceMetric::Delta => "delta",
            SurfaceMetric::Gamma => "gamma",
            SurfaceMetric::Vega => "vega",
            SurfaceMetric::Theta => "theta",
            SurfaceMetric::Rho => "rho",
        }
    }

    /// The flag selecting this metric in a [`MetricSet`].
    #[must_use]
    pub fn flag(&self) -> MetricSet {
        match self {
            SurfaceMetric::CallPrice => MetricSet::CALL_PRICE,
            SurfaceMetric::PutPrice => MetricSet::PUT_PRICE,
            SurfaceMetric::CallPL => MetricSet::CALL_PL,
            SurfaceMetric::PutPL => MetricSet::PUT_PL,
            SurfaceMetric::Delta => MetricSet::DELTA,
            SurfaceMetric::Gamma => MetricSet::GAMMA,
            SurfaceMetric::Vega => MetricSet::VEGA,
            SurfaceMetric::Theta => MetricSet::THETA,
            SurfaceMetric::Rho => MetricSet::RHO,
        }
    }

    /// Reads this metric off a pricing result.
    #[must_use]
    pub fn extract(
        &self,
        result: &PricingResult,
        costs: &PurchaseCosts,
        option_type: OptionType,
    ) -> f64 {
        let greeks = result.greeks(option_type);
        match self {
            SurfaceMetric::CallPrice => result.call_price,
            SurfaceMetric::PutPrice => result.put_price,
            SurfaceMetric::CallPL => result.call_price - costs.call,
            SurfaceMetric::PutPL => result.put_price - costs.put,
            SurfaceMetric::Delta => greeks.delta,
            SurfaceMetric::Gamma => greeks.gamma,
            SurfaceMetric::Vega => greeks.vega,
            SurfaceMetric::Theta => greeks.theta,
            SurfaceMetric::Rho => greeks.rho,
        }
    }
}

bitflags! {
    /// Set of metrics to generate in one pass over the grid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MetricSet: u16 {
        /// Call premium.
        const CALL_PRICE = 1 << 0;
        /// Put premium.
        const PUT_PRICE = 1 << 1;
        /// Call P&L.
        const CALL_PL = 1 << 2;
        /// Put P&L.
        const PUT_PL = 1 << 3;
        /// Delta.
        const DELTA = 1 << 4;
        /// Gamma.
        const GAMMA = 1 << 5;
        /// Vega.
        const VEGA = 1 << 6;
        /// Theta.
        const THETA = 1 << 7;
        /// Rho.
        const RHO = 1 << 8;

        /// Both P&L surfaces.
        const PNL = Self::CALL_PL.bits() | Self::PUT_PL.bits();
        /// All five Greeks.
        const GREEKS = Self::DELTA.bits()
            | Self::GAMMA.bits()
            | Self::VEGA.bits()
            | Self::THETA.bits()
            | Self::RHO.bits();
    }
}

impl MetricSet {
    /// Selected metrics in [`SurfaceMetric::ALL`] order.
    #[must_use]
    pub fn metrics(&self) -> Vec<SurfaceMetric> {
        SurfaceMetric::ALL
            .into_iter()
            .filter(|metric| self.contains(metric.flag()))
            .collect()
    }
}

impl From<SurfaceMetric> for MetricSet {
    fn from(metric: SurfaceMetric) -> Self {
        metric.flag()
    }
}

/// Premiums paid for the call and the put, subtracted by the P&L metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCosts {
    /// Call purchase price.
    pub call: f64,
    /// Put purchase price.
    pub put: f64,
}

impl PurchaseCosts {
    /// Creates purchase costs for a call and a put.
    #[must_use]
    pub fn new(call: f64, put: f64) -> Self {
        Self { call, put }
    }

    /// Checks that both costs are finite and non-negative.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] naming the failing leg.
    pub fn validate(&self) -> Result<(), PricingError> {
        for (parameter, value) in [("call_purchase_price", self.call), ("put_purchase_price", self.put)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::invalid_input(parameter, value));
            }
        }
        Ok(())
    }
}
