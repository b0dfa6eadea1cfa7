//! Axis and surface value types.

use super::metric::SurfaceMetric;
use crate::pricing::error::PricingError;
use serde::{Deserialize, Serialize};

/// Model input varied along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisMetric {
    /// Underlying spot price (S).
    SpotPrice,
    /// Volatility (σ).
    Volatility,
}

/// Ordered grid coordinates for one model input.
///
/// Values are finite, strictly increasing and at least two long. They are
/// not required to be positive: a non-positive spot or volatility is
/// reported by the generator as a cell failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisRepr")]
pub struct SurfaceAxis {
    metric: AxisMetric,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct AxisRepr {
    metric: AxisMetric,
    values: Vec<f64>,
}

impl TryFrom<AxisRepr> for SurfaceAxis {
    type Error = PricingError;

    fn try_from(repr: AxisRepr) -> Result<Self, Self::Error> {
        Self::new(repr.metric, repr.values)
    }
}

impl SurfaceAxis {
    /// Creates a validated axis.
    ///
    /// # Errors
    /// [`PricingError::InvalidAxis`] if fewer than two values are given, a
    /// value is not finite, or the values are not strictly increasing.
    pub fn new(metric: AxisMetric, values: Vec<f64>) -> Result<Self, PricingError> {
        let axis = Self { metric, values };
        axis.validate()?;
        Ok(axis)
    }

    /// Spot price axis.
    ///
    /// # Errors
    /// See [`SurfaceAxis::new`].
    pub fn spot(values: Vec<f64>) -> Result<Self, PricingError> {
        Self::new(AxisMetric::SpotPrice, values)
    }

    /// Volatility axis.
    ///
    /// # Errors
    /// See [`SurfaceAxis::new`].
    pub fn volatility(values: Vec<f64>) -> Result<Self, PricingError> {
        Self::new(AxisMetric::Volatility, values)
    }

    /// Re-checks the axis invariants.
    ///
    /// # Errors
    /// See [`SurfaceAxis::new`].
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.values.len() < 2 {
            return Err(PricingError::InvalidAxis {
                message: format!(
                    "{:?} axis needs at least 2 values, got {}",
                    self.metric,
                    self.values.len()
                ),
            });
        }
        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(PricingError::InvalidAxis {
                message: format!(
                    "{:?} axis value at index {index} is not finite",
                    self.metric
                ),
            });
        }
        if let Some(index) = self.values.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(PricingError::InvalidAxis {
                message: format!(
                    "{:?} axis not strictly increasing at index {}",
                    self.metric,
                    index + 1
                ),
            });
        }
        Ok(())
    }

    /// Which model input this axis varies.
    #[must_use]
    pub fn metric(&self) -> AxisMetric {
        self.metric
    }

    /// Axis coordinates.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Dense matrix of one metric over spot (x) × volatility (y).
///
/// `cells[y][x]` holds the value at `(x_axis.values()[x], y_axis.values()[y])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceRepr")]
pub struct Surface {
    x_axis: SurfaceAxis,
    y_axis: SurfaceAxis,
    cells: Vec<Vec<f64>>,
    metric: SurfaceMetric,
}

/// Loaded form of a [`Surface`], checked by [`Surface::new`].
#[derive(Deserialize)]
struct SurfaceRepr {
    x_axis: SurfaceAxis,
    y_axis: SurfaceAxis,
    cells: Vec<Vec<f64>>,
    metric: SurfaceMetric,
}

impl TryFrom<SurfaceRepr> for Surface {
    type Error = PricingError;

    fn try_from(repr: SurfaceRepr) -> Result<Self, Self::Error> {
        Self::new(repr.x_axis, repr.y_axis, repr.cells, repr.metric)
    }
}

impl Surface {
    /// Assembles a surface, checking that the cell matrix matches the axes.
    ///
    /// # Errors
    /// [`PricingError::InvalidAxis`] on a shape mismatch.
    pub fn new(
        x_axis: SurfaceAxis,
        y_axis: SurfaceAxis,
        cells: Vec<Vec<f64>>,
        metric: SurfaceMetric,
    ) -> Result<Self, PricingError> {
        let columns = x_axis.len();
        if cells.len() != y_axis.len() || cells.iter().any(|row| row.len() != columns) {
            return Err(PricingError::InvalidAxis {
                message: format!(
                    "cells do not match axes: expected {} rows of {} values",
                    y_axis.len(),
                    columns
                ),
            });
        }
        Ok(Self {
            x_axis,
            y_axis,
            cells,
            metric,
        })
    }

    /// Spot price axis (columns).
    #[must_use]
    pub fn x_axis(&self) -> &SurfaceAxis {
        &self.x_axis
    }

    /// Volatility axis (rows).
    #[must_use]
    pub fn y_axis(&self) -> &SurfaceAxis {
        &self.y_axis
    }

    /// Row-major cells indexed `[y][x]`.
    #[must_use]
    pub fn cells(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// Metric held by this surface.
    #[must_use]
    pub fn metric(&self) -> SurfaceMetric {
        self.metric
    }

    /// Display name of the metric, e.g. `"callPL"`.
    #[must_use]
    pub fn metric_name(&self) -> &'static str {
        self.metric.name()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.y_axis.len(), self.x_axis.len())
    }

    /// Value at row `y_index`, column `x_index`.
    #[must_use]
    pub fn value_at(&self, y_index: usize, x_index: usize) -> Option<f64> {
        self.cells.get(y_index)?.get(x_index).copied()
    }

    /// Iterates `(spot, volatility, value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.y_axis
            .values()
            .iter()
            .zip(&self.cells)
            .flat_map(move |(&vol, row)| {
                self.x_axis
                    .values()
                    .iter()
                    .zip(row)
                    .map(move |(&spot, &value)| (spot, vol, value))
            })
    }

    /// Smallest cell value.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest cell value.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
