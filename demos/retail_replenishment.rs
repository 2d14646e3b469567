//! 零售補貨建議示例
//!
//! 用法：
//!   cargo run --example retail_replenishment -- [銷售CSV] [配置JSON]

use anyhow::Context;
use replen::{
    HistoricalForecaster, RecommendationEngine, ReplenishmentConfig, SalesTable, SnapshotFilter,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/retail_sales.csv");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let data_path = args.next().unwrap_or_else(|| DEFAULT_DATA.to_string());

    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("無法讀取配置 {}", path))?;
            ReplenishmentConfig::from_json_str(&json)?
        }
        None => ReplenishmentConfig::default().with_demand_impact("Toys", 1.2),
    };

    println!("=== 零售補貨建議示例 ===\n");

    let table = SalesTable::from_path(&data_path)
        .with_context(|| format!("無法載入銷售資料 {}", data_path))?;
    let forecaster = HistoricalForecaster::new(&table);
    let engine = RecommendationEngine::new(config, &table, &forecaster)?;

    let report = engine.get_recommendations(&SnapshotFilter::all(), None)?;

    println!("補貨建議 (run {}):", report.run_id);
    println!(
        "  {:<8} {:<6} {:>8} {:>10} {:>10} {:>10} {:>8}  狀態",
        "商品", "門店", "庫存", "再訂購點", "訂購量", "金額", "缺貨率"
    );
    for result in &report.results {
        println!(
            "  {:<8} {:<6} {:>8.0} {:>10.1} {:>10.1} {:>10} {:>7.1}%  {:?}",
            result.product_id,
            result.store_id.as_deref().unwrap_or("-"),
            result.current_inventory,
            result.reorder_point,
            result.optimal_order_quantity,
            result.order_value,
            result.stockout_probability * 100.0,
            result.status
        );
    }

    if !report.warnings.is_empty() {
        println!("\n略過:");
        for warning in &report.warnings {
            println!("  [{:?}] {}", warning.severity, warning.message);
        }
    }

    let health = engine.get_inventory_health(&SnapshotFilter::all(), None)?;
    println!("\n庫存健康度:");
    println!("  商品/門店數: {}", health.total_items);
    println!(
        "  需要補貨: {} ({:.1}%)",
        health.items_needing_reorder, health.reorder_percentage
    );
    println!(
        "  高風險 (> {:.0}%): {} ({:.1}%)",
        health.high_risk_threshold * 100.0,
        health.high_risk_items,
        health.high_risk_percentage
    );
    println!("  建議訂購總額: {}", health.total_order_value);
    match health.average_days_until_stockout.finite() {
        Some(days) => println!("  平均距離缺貨: {:.1} 天", days),
        None => println!("  平均距離缺貨: 無限期"),
    }

    Ok(())
}
