use pnl_surface_rs::prelude::*;

#[test]
fn test_chain_scan_mixed_quotes() {
    let spot = 100.0;
    let config = ChainScanConfig::default();
    let mut quotes: Vec<ChainQuote> = [95.0, 100.0, 105.0]
        .into_iter()
        .map(|strike| {
            let inputs = ModelInputs::new(spot, strike, 0.5, 0.3, config.risk_free_rate).unwrap();
            let price = BlackScholes::option_price(&inputs, OptionType::Call).unwrap();
            ChainQuote::new(strike, price, 0.5, OptionType::Call)
        })
        .collect();
    // Below intrinsic value
    quotes.push(ChainQuote::new(80.0, 1.0, 0.5, OptionType::Call));
    // Negative strike
    quotes.push(ChainQuote::new(-5.0, 1.0, 0.5, OptionType::Put));

    let rows = scan_chain(spot, &quotes, &config).unwrap();

    for row in &rows[..3] {
        assert!((row.volatility().unwrap() - 0.3).abs() < 1e-4);
    }
    assert!(rows[3].volatility().is_none());
    assert!(rows[4].implied_volatility.is_err());
    assert_eq!(
        ChainScanSummary::from_rows(&rows),
        ChainScanSummary {
            total: 5,
            solved: 3,
            unsolved: 1,
            invalid: 1,
        }
    );
}

#[test]
fn test_chain_config_deserializes() {
    let config = ChainScanConfig::new()
        .with_risk_free_rate(0.03)
        .with_solver(SolverConfig::new().with_max_iterations(50));
    let json = serde_json::to_string(&config).unwrap();
    let restored: ChainScanConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
