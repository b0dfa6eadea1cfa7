use pnl_surface_rs::prelude::*;

const TOLERANCE: f64 = 1e-4;

fn reference_inputs() -> ModelInputs {
    ModelInputs::new(100.0, 105.0, 0.25, 0.20, 0.05).unwrap()
}

#[test]
fn test_reference_scenario() {
    let result = BlackScholes::price(&reference_inputs()).unwrap();

    assert!((result.call_price - 2.4779).abs() < TOLERANCE);
    assert!((result.put_price - 6.1736).abs() < TOLERANCE);
    assert!((result.d1 - (-0.31290)).abs() < 1e-5);
    assert!((result.call_greeks.delta - 0.37718).abs() < 1e-5);
    assert!((result.call_greeks.gamma - 0.037988).abs() < 1e-6);
    assert!((result.call_greeks.vega - 18.994).abs() < 1e-3);
    assert!((result.call_greeks.vega_per_point() - 0.18994).abs() < 1e-5);
}

#[test]
fn test_put_call_parity_across_strikes() {
    for strike in [60.0, 85.0, 100.0, 120.0, 180.0] {
        let inputs = ModelInputs::new(100.0, strike, 0.75, 0.35, 0.03).unwrap();
        let result = BlackScholes::price(&inputs).unwrap();
        let forward = inputs.spot - strike * inputs.discount_factor();
        assert!(
            (result.call_price - result.put_price - forward).abs() < 1e-9,
            "parity failed at strike {strike}"
        );
    }
}

#[test]
fn test_delta_relationship_and_shared_greeks() {
    let result = BlackScholes::price(&reference_inputs()).unwrap();
    assert!((result.call_greeks.delta - result.put_greeks.delta - 1.0).abs() < 1e-12);
    assert_eq!(result.call_greeks.gamma, result.put_greeks.gamma);
    assert_eq!(result.call_greeks.vega, result.put_greeks.vega);
}

#[test]
fn test_small_volatility_approaches_discounted_intrinsic() {
    let inputs = ModelInputs::new(110.0, 100.0, 1.0, 1e-6, 0.05).unwrap();
    let result = BlackScholes::price(&inputs).unwrap();
    let expected = 110.0 - 100.0 * (-0.05f64).exp();
    assert!((result.call_price - expected).abs() < 1e-6);
    assert!(result.put_price.abs() < 1e-6);
}

#[test]
fn test_expired_and_zero_vol_rejected() {
    let mut inputs = reference_inputs();
    inputs.time_to_expiry = 0.0;
    let error = BlackScholes::price(&inputs).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidInput);

    let inputs = reference_inputs().with_volatility(0.0);
    assert!(matches!(
        BlackScholes::price(&inputs),
        Err(PricingError::InvalidInput {
            parameter: "volatility",
            ..
        })
    ));
}

#[test]
fn test_distribution_symmetry() {
    for x in [-3.0, -1.0, -0.1, 0.0, 0.5, 2.5] {
        assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-15);
        assert!((norm_pdf(x) - norm_pdf(-x)).abs() < 1e-15);
    }
    assert_eq!(norm_cdf(40.0), 1.0);
    assert_eq!(norm_cdf(-40.0), 0.0);
}

#[test]
fn test_portfolio_totals() {
    let mut portfolio = Portfolio::new();
    portfolio.add_default_position();
    portfolio
        .add_position(Position::new(reference_inputs(), 2).unwrap())
        .unwrap();

    let valuation = portfolio.valuate(PurchaseCosts::new(5.0, 3.0)).unwrap();
    let reference = BlackScholes::price(&reference_inputs()).unwrap();
    let default = BlackScholes::price(&Position::default().inputs).unwrap();

    let expected = (default.call_price - 5.0) + 2.0 * (reference.call_price - 5.0);
    assert!((valuation.total_call_pnl - expected).abs() < 1e-10);
    let expected_gamma = default.call_greeks.gamma + 2.0 * reference.call_greeks.gamma;
    assert!((valuation.greeks.call.gamma - expected_gamma).abs() < 1e-12);
}
