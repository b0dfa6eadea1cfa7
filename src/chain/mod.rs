//! Options chain analysis.
//!
//! Computes theoretical prices and implied volatilities for quotes supplied
//! by a market data collaborator.

mod scan;

pub use scan::{ChainQuote, ChainRow, ChainScanConfig, ChainScanSummary, scan_chain};
