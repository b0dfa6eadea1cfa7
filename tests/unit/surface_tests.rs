use pnl_surface_rs::prelude::*;

fn base() -> ModelInputs {
    ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05).unwrap()
}

#[test]
fn test_heatmap_surface_matches_direct_pricing() {
    let config = HeatmapConfig::default();
    let (x, y) = config.axes(&base()).unwrap();
    assert_eq!(x.len(), 20);
    assert!((x.values()[0] - 80.0).abs() < 1e-12);
    assert!((x.values()[19] - 120.0).abs() < 1e-12);
    assert!((y.values()[0] - 0.16).abs() < 1e-12);
    assert!((y.values()[19] - 0.24).abs() < 1e-12);

    let surface =
        generate_surface(&base(), &x, &y, SurfaceMetric::CallPL, 5.0, OptionType::Call).unwrap();
    assert_eq!(surface.dimensions(), (20, 20));

    for (i, &vol) in y.values().iter().enumerate() {
        for (j, &spot) in x.values().iter().enumerate() {
            let inputs = base().with_spot(spot).with_volatility(vol);
            let expected = BlackScholes::price(&inputs).unwrap().call_price - 5.0;
            assert!((surface.cells()[i][j] - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn test_call_pnl_monotonic_in_spot() {
    let (x, y) = HeatmapConfig::default()
        .with_grid_size(8)
        .axes(&base())
        .unwrap();
    let surface =
        generate_surface(&base(), &x, &y, SurfaceMetric::CallPL, 3.0, OptionType::Call).unwrap();
    for row in surface.cells() {
        assert!(row.windows(2).all(|pair| pair[1] > pair[0]));
    }
}

#[test]
fn test_non_positive_grid_spot_is_a_cell_failure() {
    let x = SurfaceAxis::spot(vec![-10.0, 50.0, 100.0]).unwrap();
    let y = SurfaceAxis::volatility(vec![0.1, 0.2]).unwrap();

    let error =
        generate_surface(&base(), &x, &y, SurfaceMetric::Delta, 0.0, OptionType::Call).unwrap_err();

    assert!(matches!(
        error,
        PricingError::CellFailure {
            x_index: 0,
            y_index: 0,
            ..
        }
    ));
    assert_eq!(error.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_single_point_axis_rejected() {
    assert!(matches!(
        SurfaceAxis::spot(vec![100.0]),
        Err(PricingError::InvalidAxis { .. })
    ));
    assert!(AxisRange::centered(100.0, 0.2, 1).values().is_err());
}

#[test]
fn test_metric_names() {
    let names: Vec<&str> = SurfaceMetric::ALL.iter().map(|m| m.name()).collect();
    assert!(names.contains(&"callPL"));
    assert!(names.contains(&"putPL"));
    assert!(names.contains(&"vega"));
}

#[test]
fn test_portfolio_heatmaps_cover_first_position() {
    let mut portfolio = Portfolio::new();
    portfolio.add_position(Position::new(base(), 3).unwrap()).unwrap();
    portfolio.add_default_position();

    let maps = portfolio
        .heatmaps(
            PurchaseCosts::new(5.0, 3.0),
            &HeatmapConfig::default().with_grid_size(5),
        )
        .unwrap();

    let centre = maps.call_pnl.value_at(2, 2).unwrap();
    let direct = BlackScholes::price(&base()).unwrap().call_price - 5.0;
    assert!((centre - direct).abs() < 1e-12);
    assert!(maps.gamma.min() > 0.0);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_generation_is_identical() {
    let (x, y) = HeatmapConfig::default().axes(&base()).unwrap();
    let costs = PurchaseCosts::new(5.0, 3.0);
    let sequential =
        generate_surfaces(&base(), &x, &y, MetricSet::all(), costs, OptionType::Put).unwrap();
    let parallel =
        generate_surfaces_par(&base(), &x, &y, MetricSet::all(), costs, OptionType::Put).unwrap();
    assert_eq!(sequential, parallel);
}
