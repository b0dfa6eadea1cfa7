//! Building heat map axes around a base scenario.
//!
//! The generator only consumes finished axes; this is the caller-side policy
//! for deriving them from a center value, a ± fraction and a point count.

use super::types::{AxisMetric, SurfaceAxis};
use crate::pricing::error::PricingError;
use crate::pricing::types::ModelInputs;
use serde::{Deserialize, Serialize};

/// `points` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
            values[points - 1] = end;
            values
        }
    }
}

/// Symmetric range around a center value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Middle of the axis.
    pub center: f64,
    /// Half-width as a fraction of the center (0.2 = ±20%).
    pub range: f64,
    /// Number of grid points.
    pub points: usize,
}

impl AxisRange {
    /// Creates a centered range.
    #[must_use]
    pub fn centered(center: f64, range: f64, points: usize) -> Self {
        Self {
            center,
            range,
            points,
        }
    }

    /// Axis coordinates from `center·(1−range)` to `center·(1+range)`.
    ///
    /// # Errors
    /// [`PricingError::InvalidAxis`] for fewer than two points, a
    /// non-positive center or a non-positive range.
    pub fn values(&self) -> Result<Vec<f64>, PricingError> {
        if self.points < 2 {
            return Err(PricingError::InvalidAxis {
                message: format!("axis needs at least 2 points, got {}", self.points),
            });
        }
        if !(self.center.is_finite() && self.center > 0.0) {
            return Err(PricingError::InvalidAxis {
                message: format!("axis center must be positive, got {}", self.center),
            });
        }
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(PricingError::InvalidAxis {
                message: format!("axis range must be positive, got {}", self.range),
            });
        }

        Ok(linspace(
            self.center * (1.0 - self.range),
            self.center * (1.0 + self.range),
            self.points,
        ))
    }

    /// Builds the axis for `metric`.
    ///
    /// # Errors
    /// See [`AxisRange::values`].
    pub fn build(&self, metric: AxisMetric) -> Result<SurfaceAxis, PricingError> {
        SurfaceAxis::new(metric, self.values()?)
    }
}

/// Heat map grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Spot half-width as a fraction of the base spot.
    pub price_range: f64,
    /// Volatility half-width as a fraction of the base volatility.
    pub vol_range: f64,
    /// Points per axis.
    pub grid_size: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            price_range: 0.2,
            vol_range: 0.2,
            grid_size: 20,
        }
    }
}

impl HeatmapConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spot range fraction.
    #[must_use]
    pub fn with_price_range(mut self, price_range: f64) -> Self {
        self.price_range = price_range;
        self
    }

    /// Sets the volatility range fraction.
    #[must_use]
    pub fn with_vol_range(mut self, vol_range: f64) -> Self {
        self.vol_range = vol_range;
        self
    }

    /// Sets the number of points per axis.
    #[must_use]
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Spot axis centered on `inputs.spot`.
    ///
    /// # Errors
    /// See [`AxisRange::values`].
    pub fn spot_axis(&self, inputs: &ModelInputs) -> Result<SurfaceAxis, PricingError> {
        AxisRange::centered(inputs.spot, self.price_range, self.grid_size)
            .build(AxisMetric::SpotPrice)
    }

    /// Volatility axis centered on `inputs.volatility`.
    ///
    /// # Errors
    /// See [`AxisRange::values`].
    pub fn vol_axis(&self, inputs: &ModelInputs) -> Result<SurfaceAxis, PricingError> {
        AxisRange::centered(inputs.volatility, self.vol_range, self.grid_size)
            .build(AxisMetric::Volatility)
    }

    /// Both axes as `(x, y)`.
    ///
    /// # Errors
    /// See [`AxisRange::values`].
    pub fn axes(&self, inputs: &ModelInputs) -> Result<(SurfaceAxis, SurfaceAxis), PricingError> {
        Ok((self.spot_axis(inputs)?, self.vol_axis(inputs)?))
    }
}
