//! Calculation snapshots for persistence collaborators.
//!
//! A snapshot pairs the inputs of one heat map calculation with the flattened
//! P&L grid it produced. [`CalculationSnapshotPackage`] wraps it with a format
//! version and a SHA-256 checksum of the JSON payload so a storage layer can
//! detect corruption on load.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;
use uuid::Uuid;

use crate::pricing::error::PricingError;
use crate::pricing::types::ModelInputs;
use crate::surface::metric::{PurchaseCosts, SurfaceMetric};
use crate::surface::types::{AxisMetric, Surface};
use crate::utils::current_time_millis;

/// Identity and inputs of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Unique identifier of the calculation
    pub calculation_id: Uuid,

    /// Timestamp when the calculation was recorded (milliseconds since epoch)
    pub timestamp: u64,

    /// Base model inputs
    pub inputs: ModelInputs,

    /// Call and put purchase prices
    pub purchase: PurchaseCosts,
}

impl CalculationRecord {
    /// Creates a record with a fresh v4 id stamped with the current time.
    #[must_use]
    pub fn new(inputs: ModelInputs, purchase: PurchaseCosts) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: current_time_millis(),
            inputs,
            purchase,
        }
    }
}

/// One shocked scenario of a P&L grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlRow {
    /// Spot price of the scenario.
    pub shocked_spot: f64,
    /// Volatility of the scenario.
    pub shocked_volatility: f64,
    /// Call P&L at the scenario.
    pub call_pnl: f64,
    /// Put P&L at the scenario.
    pub put_pnl: f64,
}

impl PnlRow {
    /// Flattens a call P&L surface and a put P&L surface into rows.
    ///
    /// Rows are ordered volatility-major, matching [`Surface::iter_cells`].
    ///
    /// # Errors
    /// [`PricingError::InvalidAxis`] when the surfaces hold other metrics, are
    /// not laid out spot (x) by volatility (y), or have different axes.
    pub fn from_surfaces(call_pnl: &Surface, put_pnl: &Surface) -> Result<Vec<Self>, PricingError> {
        if call_pnl.metric() != SurfaceMetric::CallPL || put_pnl.metric() != SurfaceMetric::PutPL {
            return Err(PricingError::InvalidAxis {
                message: format!(
                    "expected callPL and putPL surfaces, got {} and {}",
                    call_pnl.metric_name(),
                    put_pnl.metric_name()
                ),
            });
        }
        if call_pnl.x_axis().metric() != AxisMetric::SpotPrice
            || call_pnl.y_axis().metric() != AxisMetric::Volatility
        {
            return Err(PricingError::InvalidAxis {
                message: "P&L rows need spot on x and volatility on y".to_string(),
            });
        }
        if call_pnl.x_axis() != put_pnl.x_axis() || call_pnl.y_axis() != put_pnl.y_axis() {
            return Err(PricingError::InvalidAxis {
                message: "call and put surfaces have different axes".to_string(),
            });
        }

        let rows: Vec<Self> = call_pnl
            .iter_cells()
            .zip(put_pnl.iter_cells())
            .map(|((spot, vol, call), (_, _, put))| Self {
                shocked_spot: spot,
                shocked_volatility: vol,
                call_pnl: call,
                put_pnl: put,
            })
            .collect();
        trace!("flattened {} P&L rows", rows.len());
        Ok(rows)
    }
}

/// A calculation with its P&L grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSnapshot {
    /// Calculation inputs and identity.
    pub record: CalculationRecord,
    /// Flattened grid.
    pub rows: Vec<PnlRow>,
}

impl CalculationSnapshot {
    /// Builds a snapshot from a record and its call/put P&L surfaces.
    ///
    /// # Errors
    /// See [`PnlRow::from_surfaces`].
    pub fn from_surfaces(
        record: CalculationRecord,
        call_pnl: &Surface,
        put_pnl: &Surface,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            record,
            rows: PnlRow::from_surfaces(call_pnl, put_pnl)?,
        })
    }

    /// Sorts rows volatility-major, then by spot, the order
    /// [`PnlRow::from_surfaces`] produces.
    pub fn sort_rows(&mut self) {
        self.rows.sort_by(|a, b| {
            a.shocked_volatility
                .total_cmp(&b.shocked_volatility)
                .then(a.shocked_spot.total_cmp(&b.shocked_spot))
        });
    }

    /// Checks the recorded inputs and that every row value is finite.
    ///
    /// JSON has no encoding for NaN or infinity, so such rows would not load
    /// back.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for invalid record inputs,
    /// [`PricingError::InvalidOperation`] for a non-finite row.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.record.inputs.validate()?;
        self.record.purchase.validate()?;
        let non_finite = self.rows.iter().position(|row| {
            [
                row.shocked_spot,
                row.shocked_volatility,
                row.call_pnl,
                row.put_pnl,
            ]
            .iter()
            .any(|value| !value.is_finite())
        });
        if let Some(index) = non_finite {
            return Err(PricingError::InvalidOperation {
                message: format!("P&L row {index} holds a non-finite value"),
            });
        }
        Ok(())
    }

    /// Scenario with the highest call P&L.
    pub fn best_call(&self) -> Option<&PnlRow> {
        self.rows
            .iter()
            .max_by(|a, b| a.call_pnl.total_cmp(&b.call_pnl))
    }

    /// Scenario with the highest put P&L.
    pub fn best_put(&self) -> Option<&PnlRow> {
        self.rows.iter().max_by(|a, b| a.put_pnl.total_cmp(&b.put_pnl))
    }
}

/// Format version used for checksum-enabled calculation snapshots.
pub const CALCULATION_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for `CalculationSnapshot` instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationSnapshotPackage {
    /// Version of the snapshot schema for forward compatibility.
    pub version: u32,
    /// Snapshot payload.
    pub snapshot: CalculationSnapshot,
    /// Hex-encoded checksum of the serialized snapshot.
    pub checksum: String,
}

impl CalculationSnapshotPackage {
    /// Creates a new package computing the checksum of the snapshot contents.
    ///
    /// The snapshot is validated and its rows put in grid order first, so
    /// equal calculations get equal checksums.
    pub fn new(mut snapshot: CalculationSnapshot) -> Result<Self, PricingError> {
        snapshot.validate()?;
        snapshot.sort_rows();

        let checksum = Self::compute_checksum(&snapshot)?;

        Ok(Self {
            version: CALCULATION_SNAPSHOT_FORMAT_VERSION,
            snapshot,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, PricingError> {
        serde_json::to_string(self).map_err(|error| PricingError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    pub fn from_json(data: &str) -> Result<Self, PricingError> {
        serde_json::from_str(data).map_err(|error| PricingError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the version, the checksum and the snapshot contents.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.version != CALCULATION_SNAPSHOT_FORMAT_VERSION {
            return Err(PricingError::InvalidOperation {
                message: format!(
                    "Unsupported snapshot version: {} (expected {})",
                    self.version, CALCULATION_SNAPSHOT_FORMAT_VERSION
                ),
            });
        }

        let computed = Self::compute_checksum(&self.snapshot)?;
        if computed != self.checksum {
            return Err(PricingError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        self.snapshot.validate()
    }

    /// Consumes the package and returns the validated snapshot.
    pub fn into_snapshot(self) -> Result<CalculationSnapshot, PricingError> {
        self.validate()?;
        Ok(self.snapshot)
    }

    fn compute_checksum(snapshot: &CalculationSnapshot) -> Result<String, PricingError> {
        let payload =
            serde_json::to_vec(snapshot).map_err(|error| PricingError::SerializationError {
                message: error.to_string(),
            })?;

        let digest = Sha256::digest(payload);
        Ok(format!("{digest:x}"))
    }
}
