use pnl_surface_rs::prelude::*;

#[test]
fn test_heatmap_snapshot_survives_json() {
    let inputs = ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05).unwrap();
    let purchase = PurchaseCosts::new(5.0, 3.0);
    let (x, y) = HeatmapConfig::default().axes(&inputs).unwrap();
    let surfaces =
        generate_surfaces(&inputs, &x, &y, MetricSet::PNL, purchase, OptionType::Call).unwrap();

    let record = CalculationRecord::new(inputs, purchase);
    let snapshot = CalculationSnapshot::from_surfaces(record, &surfaces[0], &surfaces[1]).unwrap();
    assert_eq!(snapshot.rows.len(), 400);

    let json = CalculationSnapshotPackage::new(snapshot.clone())
        .unwrap()
        .to_json()
        .unwrap();
    let restored = CalculationSnapshotPackage::from_json(&json)
        .unwrap()
        .into_snapshot()
        .unwrap();

    assert_eq!(restored.record.calculation_id, record.calculation_id);
    assert_eq!(restored.rows, snapshot.rows);
}

#[test]
fn test_corrupted_checksum_is_a_storage_error() {
    let inputs = ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05).unwrap();
    let snapshot = CalculationSnapshot {
        record: CalculationRecord::new(inputs, PurchaseCosts::default()),
        rows: Vec::new(),
    };
    let mut package = CalculationSnapshotPackage::new(snapshot).unwrap();
    package.checksum = "0".repeat(64);

    let error = package.validate().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Storage);
}
