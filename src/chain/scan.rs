//! Implied volatility scan over an options chain.
//!
//! Quotes come from an external market data source. Each row is solved on
//! its own; invalid or unsolvable rows are recorded and skipped, never
//! aborting the rest of the chain.

use crate::pricing::black_scholes::BlackScholes;
use crate::pricing::error::PricingError;
use crate::pricing::implied_volatility::{IVParams, IVResult, SolverConfig, solve_iv};
use crate::pricing::types::{OptionType, require_positive};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One listed contract with its last traded price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainQuote {
    /// Strike price.
    pub strike: f64,
    /// Last traded premium.
    pub last_price: f64,
    /// Time to expiration in years.
    pub time_to_expiry: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl ChainQuote {
    /// Creates a quote.
    #[must_use]
    pub fn new(strike: f64, last_price: f64, time_to_expiry: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            last_price,
            time_to_expiry,
            option_type,
        }
    }
}

/// Scan settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainScanConfig {
    /// Rate used for every row (default 5%).
    pub risk_free_rate: f64,
    /// Volatility for the theoretical price column (default 20%).
    pub reference_volatility: f64,
    /// Solver settings applied to every row.
    pub solver: SolverConfig,
}

impl Default for ChainScanConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            reference_volatility: 0.2,
            solver: SolverConfig::default(),
        }
    }
}

impl ChainScanConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the reference volatility.
    #[must_use]
    pub fn with_reference_volatility(mut self, reference_volatility: f64) -> Self {
        self.reference_volatility = reference_volatility;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Scan output for one quote.
#[derive(Debug, Clone)]
pub struct ChainRow {
    /// The quote as supplied.
    pub quote: ChainQuote,
    /// Price at the reference volatility, if the quote is valid.
    pub theoretical_price: Option<f64>,
    /// Solver outcome, or the input error that prevented solving.
    pub implied_volatility: Result<IVResult, PricingError>,
}

impl ChainRow {
    /// Implied volatility when the solve converged.
    #[must_use]
    pub fn volatility(&self) -> Option<f64> {
        match &self.implied_volatility {
            Ok(result) if result.converged => Some(result.volatility),
            _ => None,
        }
    }

    /// True when the row has a converged implied volatility.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.volatility().is_some()
    }
}

/// Row counts of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainScanSummary {
    /// Rows scanned.
    pub total: usize,
    /// Rows with a converged implied volatility.
    pub solved: usize,
    /// Valid rows without a solution or without convergence.
    pub unsolved: usize,
    /// Rows rejected for invalid inputs.
    pub invalid: usize,
}

impl ChainScanSummary {
    /// Counts outcomes across rows.
    #[must_use]
    pub fn from_rows(rows: &[ChainRow]) -> Self {
        rows.iter().fold(
            Self {
                total: rows.len(),
                ..Self::default()
            },
            |mut summary, row| {
                match &row.implied_volatility {
                    Ok(result) if result.converged => summary.solved += 1,
                    Ok(_) => summary.unsolved += 1,
                    Err(_) => summary.invalid += 1,
                }
                summary
            },
        )
    }
}

fn scan_row(spot: f64, quote: &ChainQuote, config: &ChainScanConfig) -> ChainRow {
    let params = IVParams::new(
        spot,
        quote.strike,
        quote.time_to_expiry,
        config.risk_free_rate,
        quote.option_type,
    );
    let theoretical_price = BlackScholes::option_price(
        &params.with_volatility(config.reference_volatility),
        quote.option_type,
    )
    .ok();

    let implied_volatility = solve_iv(&params, quote.last_price, &config.solver);
    match &implied_volatility {
        Ok(result) if !result.converged => warn!(
            "no implied volatility for {:?} strike {} at price {}: {:?}",
            quote.option_type, quote.strike, quote.last_price, result.failure
        ),
        Err(error) => warn!(
            "skipping {:?} strike {}: {}",
            quote.option_type, quote.strike, error
        ),
        Ok(_) => {}
    }

    ChainRow {
        quote: *quote,
        theoretical_price,
        implied_volatility,
    }
}

/// Solves every quote of a chain against one spot price.
///
/// # Errors
/// [`PricingError::InvalidInput`] only for an invalid spot, rate or reference
/// volatility, which would invalidate every row. Row-level problems are
/// reported inside each [`ChainRow`].
pub fn scan_chain(
    spot: f64,
    quotes: &[ChainQuote],
    config: &ChainScanConfig,
) -> Result<Vec<ChainRow>, PricingError> {
    require_positive("spot", spot)?;
    require_positive("reference_volatility", config.reference_volatility)?;
    if !config.risk_free_rate.is_finite() {
        return Err(PricingError::invalid_input(
            "risk_free_rate",
            config.risk_free_rate,
        ));
    }

    let rows: Vec<ChainRow> = quotes
        .iter()
        .map(|quote| scan_row(spot, quote, config))
        .collect();

    let summary = ChainScanSummary::from_rows(&rows);
    debug!(
        "scanned {} quotes: {} solved, {} unsolved, {} invalid",
        summary.total, summary.solved, summary.unsolved, summary.invalid
    );
    Ok(rows)
}
