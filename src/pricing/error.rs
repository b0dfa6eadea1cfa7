//! Error types for pricing, implied volatility and surface generation.

use std::fmt;

/// Coarse classification of a [`PricingError`].
///
/// Presentation layers use this to tell "calculation error, fix the inputs"
/// apart from "no implied volatility exists for this quote".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Inputs are outside the model domain (includes numeric domain failures).
    InvalidInput,
    /// Observed price lies outside the achievable price range.
    NoSolution,
    /// Iteration cap reached before the tolerance was met.
    NonConvergence,
    /// Snapshot encoding, decoding or integrity failure.
    Storage,
}

/// Errors raised by the pricing core.
#[derive(Debug, Clone)]
pub enum PricingError {
    /// A model input is non-positive or non-finite.
    InvalidInput {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value that was rejected.
        value: f64,
    },

    /// An intermediate quantity (d1, d2, discount factor) is not finite.
    NumericDomain {
        /// Description of the failing computation.
        message: String,
    },

    /// Observed price cannot be reproduced by any volatility.
    NoSolution {
        /// Observed market price.
        price: f64,
        /// Lowest achievable price.
        lower_bound: f64,
        /// Highest achievable price.
        upper_bound: f64,
    },

    /// Solver stopped at its iteration cap.
    NonConvergence {
        /// Number of iterations performed.
        iterations: u32,
        /// Best volatility estimate found.
        last_volatility: f64,
        /// Pricing error at that estimate.
        residual: f64,
    },

    /// Surface axis is malformed (too short, not increasing, non-finite).
    InvalidAxis {
        /// Description of the problem.
        message: String,
    },

    /// A single grid cell failed to price.
    CellFailure {
        /// Column index (spot axis).
        x_index: usize,
        /// Row index (volatility axis).
        y_index: usize,
        /// Underlying pricing error.
        source: Box<PricingError>,
    },

    /// Serialization of a snapshot failed.
    SerializationError {
        /// Error message from the encoder.
        message: String,
    },

    /// Deserialization of a snapshot failed.
    DeserializationError {
        /// Error message from the decoder.
        message: String,
    },

    /// Snapshot checksum does not match its payload.
    ChecksumMismatch {
        /// Checksum stored in the package.
        expected: String,
        /// Checksum recomputed from the payload.
        actual: String,
    },

    /// Operation not supported for the given data.
    InvalidOperation {
        /// Description of the problem.
        message: String,
    },
}

impl PricingError {
    /// Shorthand for an [`PricingError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(parameter: &'static str, value: f64) -> Self {
        PricingError::InvalidInput { parameter, value }
    }

    /// Returns the reporting category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PricingError::InvalidInput { .. }
            | PricingError::NumericDomain { .. }
            | PricingError::InvalidAxis { .. }
            | PricingError::CellFailure { .. } => ErrorKind::InvalidInput,
            PricingError::NoSolution { .. } => ErrorKind::NoSolution,
            PricingError::NonConvergence { .. } => ErrorKind::NonConvergence,
            PricingError::SerializationError { .. }
            | PricingError::DeserializationError { .. }
            | PricingError::ChecksumMismatch { .. }
            | PricingError::InvalidOperation { .. } => ErrorKind::Storage,
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput { parameter, value } => {
                write!(f, "invalid input: {parameter} must be positive and finite, got {value}")
            }
            PricingError::NumericDomain { message } => {
                write!(f, "numeric domain error: {message}")
            }
            PricingError::NoSolution {
                price,
                lower_bound,
                upper_bound,
            } => {
                write!(
                    f,
                    "no implied volatility: price {price:.4} outside achievable range [{lower_bound:.4}, {upper_bound:.4}]"
                )
            }
            PricingError::NonConvergence {
                iterations,
                last_volatility,
                residual,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last volatility: {last_volatility:.6}, residual: {residual:.3e}"
                )
            }
            PricingError::InvalidAxis { message } => {
                write!(f, "invalid axis: {message}")
            }
            PricingError::CellFailure {
                x_index,
                y_index,
                source,
            } => {
                write!(f, "surface cell [{y_index}][{x_index}] failed: {source}")
            }
            PricingError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            PricingError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            PricingError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            PricingError::InvalidOperation { message } => {
                write!(f, "invalid operation: {message}")
            }
        }
    }
}

impl std::error::Error for PricingError {}
