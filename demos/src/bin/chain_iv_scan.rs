//! Implied volatility scan over a synthetic options chain
//!
//! Quotes are generated from a volatility smile, then perturbed with a few
//! rows no model can explain, to show how the scan reports and skips them.

use pnl_surface_rs::prelude::*;
use tracing::{info, warn};

const SPOT: f64 = 100.0;
const EXPIRY: f64 = 30.0 / 365.0;

fn smile(strike: f64) -> f64 {
    let moneyness = (strike / SPOT).ln();
    0.2 + 0.8 * moneyness * moneyness - 0.1 * moneyness
}

fn synthetic_chain(config: &ChainScanConfig) -> Result<Vec<ChainQuote>, PricingError> {
    let mut quotes = Vec::new();
    for strike in (80..=120).step_by(5).map(f64::from) {
        let option_type = if strike < SPOT {
            OptionType::Put
        } else {
            OptionType::Call
        };
        let inputs = ModelInputs::new(SPOT, strike, EXPIRY, smile(strike), config.risk_free_rate)?;
        let price = BlackScholes::option_price(&inputs, option_type)?;
        // Quotes trade in cents
        let last_price = (price * 100.0).round() / 100.0;
        if last_price > 0.0 {
            quotes.push(ChainQuote::new(strike, last_price, EXPIRY, option_type));
        }
    }

    // Stale print above the call maximum
    quotes.push(ChainQuote::new(105.0, 150.0, EXPIRY, OptionType::Call));
    // Expired contract
    quotes.push(ChainQuote::new(100.0, 1.5, 0.0, OptionType::Put));
    Ok(quotes)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting options chain scan");

    let config = ChainScanConfig::default();
    let quotes = synthetic_chain(&config)?;
    let rows = scan_chain(SPOT, &quotes, &config)?;

    for row in &rows {
        let theoretical = row
            .theoretical_price
            .map_or_else(|| "-".to_string(), |price| format!("{price:.4}"));
        match &row.implied_volatility {
            Ok(result) if result.converged => info!(
                "{:?} K={} last {:.2} theo {} IV {:.2}% ({} iterations)",
                row.quote.option_type,
                row.quote.strike,
                row.quote.last_price,
                theoretical,
                result.volatility_percent(),
                result.iterations
            ),
            Ok(result) => warn!(
                "{:?} K={} last {:.2}: no implied volatility ({:?})",
                row.quote.option_type, row.quote.strike, row.quote.last_price, result.failure
            ),
            Err(error) => warn!(
                "{:?} K={} skipped: {}",
                row.quote.option_type, row.quote.strike, error
            ),
        }
    }

    let summary = ChainScanSummary::from_rows(&rows);
    info!(
        "scanned {} quotes: {} solved, {} unsolved, {} invalid",
        summary.total, summary.solved, summary.unsolved, summary.invalid
    );
    Ok(())
}
