//! P&L report for a small option portfolio
//!
//! This demo shows how to:
//! 1. Price a base scenario with its Greeks
//! 2. Value a multi-position portfolio against purchase prices
//! 3. Build the heat map surfaces of the first position
//! 4. Package the calculation as a checksummed JSON snapshot

use pnl_surface_rs::prelude::*;
use tracing::info;

fn log_pricing(inputs: &ModelInputs, result: &PricingResult) {
    info!(
        "S={} K={} T={} σ={} r={}",
        inputs.spot, inputs.strike, inputs.time_to_expiry, inputs.volatility, inputs.risk_free_rate
    );
    for option_type in [OptionType::Call, OptionType::Put] {
        let greeks = result.greeks(option_type);
        info!(
            "{:?}: price {:.4}, delta {:.4}, gamma {:.4}, theta/day {:.4}, vega/pt {:.4}, rho/pt {:.4}",
            option_type,
            result.price(option_type),
            greeks.delta,
            greeks.gamma,
            greeks.theta_per_day(),
            greeks.vega_per_point(),
            greeks.rho_per_point()
        );
    }
}

fn log_surface(surface: &Surface) {
    let (rows, columns) = surface.dimensions();
    info!(
        "{} surface {}x{}: min {:.4}, max {:.4}",
        surface.metric_name(),
        rows,
        columns,
        surface.min(),
        surface.max()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting P&L report");

    let base = ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05)?;
    let purchase = PurchaseCosts::new(5.0, 3.0);
    log_pricing(&base, &BlackScholes::price(&base)?);

    let mut portfolio = Portfolio::new();
    portfolio.add_position(Position::new(base, 2)?)?;
    portfolio.add_position(Position::new(ModelInputs::new(100.0, 110.0, 0.5, 0.25, 0.05)?, 1)?)?;

    let valuation = portfolio.valuate(purchase)?;
    for line in &valuation.positions {
        info!(
            "position {} x{}: call P&L {:.4}, put P&L {:.4}",
            line.index, line.quantity, line.call_pnl, line.put_pnl
        );
    }
    info!(
        "totals: call P&L {:.4}, put P&L {:.4}, call delta {:.4}, put delta {:.4}, gamma {:.4}",
        valuation.total_call_pnl,
        valuation.total_put_pnl,
        valuation.greeks.call.delta,
        valuation.greeks.put.delta,
        valuation.greeks.call.gamma
    );

    let maps = portfolio.heatmaps(purchase, &HeatmapConfig::default())?;
    for surface in [
        &maps.call_pnl,
        &maps.put_pnl,
        &maps.call_delta,
        &maps.put_delta,
        &maps.gamma,
        &maps.vega,
    ] {
        log_surface(surface);
    }

    let record = CalculationRecord::new(base, purchase);
    let snapshot = CalculationSnapshot::from_surfaces(record, &maps.call_pnl, &maps.put_pnl)?;
    if let Some(best) = snapshot.best_call() {
        info!(
            "best call scenario: S={:.2} σ={:.4} P&L {:.4}",
            best.shocked_spot, best.shocked_volatility, best.call_pnl
        );
    }

    let package = CalculationSnapshotPackage::new(snapshot)?;
    let json = package.to_json()?;
    info!(
        "snapshot {} with {} rows, {} bytes, checksum {}",
        record.calculation_id,
        package.snapshot.rows.len(),
        json.len(),
        package.checksum
    );

    CalculationSnapshotPackage::from_json(&json)?.validate()?;
    info!("P&L report completed successfully");
    Ok(())
}
