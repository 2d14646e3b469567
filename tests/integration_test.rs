//! 集成測試

use chrono::{Duration, NaiveDate};
use replen::{
    DaysUntilStockout, HistoricalForecaster, RecommendationEngine, ReorderStatus, ReplenError,
    ReplenishmentConfig, SalesTable, SnapshotFilter,
};
use rstest::rstest;
use rust_decimal::Decimal;

/// 產生 CSV：每列 (商品, 門店, 品類, 天數, 每日銷量, 最後一天庫存, 單價)
fn sales_csv(rows: &[(&str, &str, &str, i64, f64, f64, &str)]) -> String {
    let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let end = start + Duration::days(34);
    let mut csv =
        String::from("date,product_id,store_id,category,region,inventory_level,units_sold,price\n");

    for &(product, store, category, days, daily_sales, inventory, price) in rows {
        for offset in 0..days {
            let date = end - Duration::days(days - 1 - offset);
            let level = inventory + daily_sales * (days - 1 - offset) as f64;
            csv.push_str(&format!(
                "{},{},{},{},North,{},{},{}\n",
                date, product, store, category, level, daily_sales, price
            ));
        }
    }
    csv
}

fn sample_table() -> SalesTable {
    let csv = sales_csv(&[
        ("SKU-MILK", "S-02", "Dairy", 35, 10.0, 50.0, "10.00"),
        ("SKU-MILK", "S-01", "Dairy", 35, 10.0, 500.0, "10.00"),
        ("SKU-TOY", "S-01", "Toys", 35, 2.0, 3.0, "25.00"),
        ("SKU-NEW", "S-01", "Toys", 5, 4.0, 20.0, "12.00"),
        ("SKU-SLOW", "S-01", "Toys", 35, 0.0, 40.0, "8.00"),
    ]);
    SalesTable::from_reader(csv.as_bytes()).unwrap()
}

#[test]
fn test_full_pipeline() {
    let table = sample_table();
    let forecaster = HistoricalForecaster::new(&table);
    let engine =
        RecommendationEngine::new(ReplenishmentConfig::default(), &table, &forecaster).unwrap();

    let report = engine
        .get_recommendations(&SnapshotFilter::all(), Some(30))
        .unwrap();

    // SKU-NEW 歷史不足被略過
    let keys: Vec<_> = report
        .results
        .iter()
        .map(|r| (r.product_id.as_str(), r.store_id.as_deref()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("SKU-MILK", Some("S-01")),
            ("SKU-MILK", Some("S-02")),
            ("SKU-SLOW", Some("S-01")),
            ("SKU-TOY", Some("S-01")),
        ]
    );
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.warnings[0].product_id, "SKU-NEW");

    // 庫存 50，每日 10，無變異 → 再訂購點 70，需要補貨，EOQ = sqrt(73000)
    let milk_low = &report.results[1];
    assert_eq!(milk_low.current_inventory, 50.0);
    assert_eq!(milk_low.reorder_point, 70.0);
    assert_eq!(milk_low.status, ReorderStatus::NeedsReorder);
    assert!((milk_low.optimal_order_quantity - 270.19).abs() < 0.01);
    assert_eq!(milk_low.days_until_stockout, DaysUntilStockout::Finite(5.0));

    // 庫存 500 充足
    let milk_high = &report.results[0];
    assert_eq!(milk_high.status, ReorderStatus::Sufficient);
    assert_eq!(milk_high.optimal_order_quantity, 0.0);
    assert_eq!(milk_high.stockout_probability, 0.0);

    // 零銷量 → 無限期
    let slow = &report.results[2];
    assert!(slow.days_until_stockout.is_unbounded());
    assert_eq!(slow.economic_order_quantity, 0.0);

    for result in &report.results {
        assert_eq!(
            result.status == ReorderStatus::NeedsReorder,
            result.current_inventory <= result.reorder_point
        );
        assert!((0.0..=1.0).contains(&result.stockout_probability));
    }
}

#[test]
fn test_recommendations_are_idempotent() {
    let table = sample_table();
    let forecaster = HistoricalForecaster::new(&table);
    let engine =
        RecommendationEngine::new(ReplenishmentConfig::default(), &table, &forecaster).unwrap();

    let first = engine
        .get_recommendations(&SnapshotFilter::all(), None)
        .unwrap();
    let second = engine
        .get_recommendations(&SnapshotFilter::all(), None)
        .unwrap();

    assert_eq!(first.results, second.results);
    for (a, b) in first.results.iter().zip(&second.results) {
        assert_eq!(a.reorder_point.to_bits(), b.reorder_point.to_bits());
        assert_eq!(a.stockout_probability.to_bits(), b.stockout_probability.to_bits());
    }
}

#[test]
fn test_inventory_health() {
    let table = sample_table();
    let forecaster = HistoricalForecaster::new(&table);
    let engine =
        RecommendationEngine::new(ReplenishmentConfig::default(), &table, &forecaster).unwrap();

    let report = engine
        .get_recommendations(&SnapshotFilter::all(), None)
        .unwrap();
    let health = engine
        .get_inventory_health(&SnapshotFilter::all(), None)
        .unwrap();

    let needing = report.results.iter().filter(|r| r.needs_reorder()).count();
    let value: Decimal = report.results.iter().map(|r| r.order_value).sum();

    assert_eq!(health.total_items, 4);
    assert_eq!(health.items_needing_reorder, needing);
    assert_eq!(health.reorder_percentage, needing as f64 / 4.0 * 100.0);
    assert_eq!(health.total_order_value, value);
    assert!(health.total_order_value > Decimal::ZERO);
    assert!(health.average_days_until_stockout.finite().is_some());
    assert_eq!(health.high_risk_threshold, 0.25);
}

#[test]
fn test_filter_by_store() {
    let table = sample_table();
    let forecaster = HistoricalForecaster::new(&table);
    let engine =
        RecommendationEngine::new(ReplenishmentConfig::default(), &table, &forecaster).unwrap();

    let report = engine
        .get_recommendations(
            &SnapshotFilter::all()
                .with_product_id("SKU-MILK")
                .with_store_id("S-02"),
            None,
        )
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].current_inventory, 50.0);
}

#[test]
fn test_no_matching_rows() {
    let table = sample_table();
    let forecaster = HistoricalForecaster::new(&table);
    let engine =
        RecommendationEngine::new(ReplenishmentConfig::default(), &table, &forecaster).unwrap();
    let filter = SnapshotFilter::all().with_product_id("SKU-UNKNOWN");

    let report = engine.get_recommendations(&filter, None).unwrap();
    assert!(report.results.is_empty());

    let health = engine.get_inventory_health(&filter, None).unwrap();
    assert_eq!(health.total_items, 0);
    assert_eq!(health.items_needing_reorder, 0);
    assert_eq!(health.high_risk_items, 0);
    assert_eq!(health.total_order_value, Decimal::ZERO);
    assert!(health.average_days_until_stockout.is_unbounded());
}

#[rstest]
#[case(3, 30.0)]
#[case(7, 70.0)]
#[case(10, 100.0)]
fn test_lead_time_from_json_config(#[case] lead_time: u32, #[case] expected: f64) {
    let table = sample_table();
    let forecaster = HistoricalForecaster::new(&table);
    let json = format!(r#"{{"lead_time_days": {}, "forecast_days": 14}}"#, lead_time);
    let config = ReplenishmentConfig::from_json_str(&json).unwrap();
    let engine = RecommendationEngine::new(config, &table, &forecaster).unwrap();

    let report = engine
        .get_recommendations(&SnapshotFilter::all().with_product_id("SKU-MILK"), None)
        .unwrap();

    // 每日 10，無變異 → 再訂購點 = 10 × 提前期
    assert_eq!(report.results.len(), 2);
    assert!(report.results.iter().all(|r| r.reorder_point == expected));
}

#[test]
fn test_stale_product_is_absent_from_filtered_and_unfiltered_results() {
    // SKU-OLD 最後一筆比資料表最新日期早一天
    let mut csv = sales_csv(&[
        ("SKU-MILK", "S-01", "Dairy", 35, 10.0, 50.0, "10.00"),
        ("SKU-TOY", "S-01", "Toys", 35, 2.0, 3.0, "25.00"),
    ]);
    for day in 1..=20 {
        csv.push_str(&format!("2025-09-{:02},SKU-OLD,S-01,Toys,North,30,2,4.00\n", day));
    }
    let table = SalesTable::from_reader(csv.as_bytes()).unwrap();
    let forecaster = HistoricalForecaster::new(&table);
    let engine =
        RecommendationEngine::new(ReplenishmentConfig::default(), &table, &forecaster).unwrap();

    let all = engine
        .get_recommendations(&SnapshotFilter::all(), None)
        .unwrap();
    assert!(all.results.iter().all(|r| r.product_id != "SKU-OLD"));

    for filter in [
        SnapshotFilter::all().with_product_id("SKU-OLD"),
        SnapshotFilter::all().with_product_id("SKU-TOY"),
        SnapshotFilter::all().with_store_id("S-01"),
    ] {
        let filtered = engine.get_recommendations(&filter, None).unwrap();
        for result in &filtered.results {
            assert!(all.results.contains(result));
        }
    }
}

#[test]
fn test_negative_inventory_in_csv_is_rejected() {
    let mut csv = sales_csv(&[("SKU-MILK", "S-01", "Dairy", 35, 10.0, 50.0, "10.00")]);
    csv.push_str("2025-10-05,SKU-NEG,S-01,Toys,North,-25,1,5.00\n");

    assert!(matches!(
        SalesTable::from_reader(csv.as_bytes()),
        Err(ReplenError::DataUnavailable(_))
    ));
}
