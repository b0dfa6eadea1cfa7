use pnl_surface_rs::prelude::*;

fn price_at(params: &IVParams, vol: f64) -> f64 {
    BlackScholes::option_price(&params.with_volatility(vol), params.option_type).unwrap()
}

#[test]
fn test_round_trip_through_pricing_engine() {
    let config = SolverConfig::default();
    for option_type in [OptionType::Call, OptionType::Put] {
        for strike in [90.0, 100.0, 110.0] {
            for vol in [0.1, 0.25, 0.6, 1.2] {
                let params = IVParams::new(100.0, strike, 0.5, 0.03, option_type);
                let observed = price_at(&params, vol);

                let result = solve_iv(&params, observed, &config).unwrap();

                assert!(result.converged, "{option_type:?} K={strike} vol={vol}");
                assert!(
                    (result.volatility - vol).abs() < 1e-4,
                    "{option_type:?} K={strike}: expected {vol}, got {}",
                    result.volatility
                );
                assert!(result.iterations <= config.max_iterations);
            }
        }
    }
}

#[test]
fn test_reference_call_price_recovers_twenty_percent() {
    let params = IVParams::call(100.0, 105.0, 0.25, 0.05);
    let vol = solve_iv(&params, 2.4779, &SolverConfig::default())
        .unwrap()
        .into_volatility()
        .unwrap();
    assert!((vol - 0.20).abs() < 1e-4);
}

#[test]
fn test_arbitrage_violating_price_is_reported() {
    let params = IVParams::call(100.0, 105.0, 0.25, 0.05);

    let result = solve_iv(&params, 200.0, &SolverConfig::default()).unwrap();

    assert!(!result.converged);
    assert_eq!(result.iterations, 0);
    let error = result.into_volatility().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NoSolution);
}

#[test]
fn test_user_initial_guess_is_honoured() {
    let params = IVParams::put(100.0, 95.0, 1.0, 0.02);
    let observed = price_at(&params, 0.45);
    let config = SolverConfig::new().with_initial_guess(0.45);

    let result = solve_iv(&params, observed, &config).unwrap();

    assert!(result.converged);
    assert!(result.iterations <= 2);
}

#[test]
fn test_non_positive_observed_price_is_invalid() {
    let params = IVParams::call(100.0, 100.0, 0.25, 0.05);
    let error = solve_iv(&params, 0.0, &SolverConfig::default()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidInput);
}
