//! 庫存健康度彙總

use replen_core::{DaysUntilStockout, HealthSummary, ReorderResult};
use rust_decimal::Decimal;

/// 庫存健康度彙總器
pub struct HealthAggregator;

impl HealthAggregator {
    /// 彙總補貨建議
    ///
    /// 平均缺貨天數只計入有限值，沒有任何有限值時為 `Unbounded`。
    pub fn summarize(results: &[ReorderResult], high_risk_threshold: f64) -> HealthSummary {
        if results.is_empty() {
            return HealthSummary::empty(high_risk_threshold);
        }

        let total_items = results.len();
        let items_needing_reorder = results.iter().filter(|r| r.needs_reorder()).count();
        let high_risk_items = results
            .iter()
            .filter(|r| r.is_high_risk(high_risk_threshold))
            .count();
        let total_order_value: Decimal = results.iter().map(|r| r.order_value).sum();

        let finite_days: Vec<f64> = results
            .iter()
            .filter_map(|r| r.days_until_stockout.finite())
            .collect();
        let average_days_until_stockout = if finite_days.is_empty() {
            DaysUntilStockout::Unbounded
        } else {
            DaysUntilStockout::Finite(finite_days.iter().sum::<f64>() / finite_days.len() as f64)
        };

        HealthSummary {
            total_items,
            items_needing_reorder,
            reorder_percentage: percentage(items_needing_reorder, total_items),
            total_order_value,
            average_days_until_stockout,
            high_risk_items,
            high_risk_percentage: percentage(high_risk_items, total_items),
            high_risk_threshold,
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
