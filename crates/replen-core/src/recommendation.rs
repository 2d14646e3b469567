//! 補貨建議與庫存健康度模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 補貨狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReorderStatus {
    /// 需要補貨（現有庫存 ≤ 再訂購點）
    NeedsReorder,
    /// 庫存充足
    Sufficient,
}

impl ReorderStatus {
    /// 依現有庫存與再訂購點判定狀態
    pub fn evaluate(current_inventory: f64, reorder_point: f64) -> Self {
        if current_inventory <= reorder_point {
            Self::NeedsReorder
        } else {
            Self::Sufficient
        }
    }
}

/// 距離缺貨的天數
///
/// 平均預測需求 ≤ 0 時為 `Unbounded`，不以無限大數值表示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DaysUntilStockout {
    Finite(f64),
    Unbounded,
}

impl DaysUntilStockout {
    /// 取得有限天數
    pub fn finite(&self) -> Option<f64> {
        match self {
            Self::Finite(days) => Some(*days),
            Self::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

/// 單一商品/門店的補貨計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderResult {
    /// 商品ID
    pub product_id: String,

    /// 門店ID
    pub store_id: Option<String>,

    /// 品類
    pub category: String,

    /// 區域
    pub region: Option<String>,

    /// 現有庫存
    pub current_inventory: f64,

    /// 單價
    pub unit_price: Decimal,

    /// 預測期間平均每日需求
    pub average_daily_demand: f64,

    /// 年需求量（平均每日需求 × 365）
    pub annual_demand: f64,

    /// 安全庫存
    pub safety_stock: f64,

    /// 再訂購點
    pub reorder_point: f64,

    /// 經濟訂購量
    pub economic_order_quantity: f64,

    /// 建議訂購量（需要補貨時為 EOQ，否則為 0）
    pub optimal_order_quantity: f64,

    /// 建議訂購金額
    pub order_value: Decimal,

    /// 距離缺貨天數
    pub days_until_stockout: DaysUntilStockout,

    /// 預測期間內的缺貨機率
    pub stockout_probability: f64,

    /// 補貨狀態
    pub status: ReorderStatus,
}

impl ReorderResult {
    /// 是否需要補貨
    pub fn needs_reorder(&self) -> bool {
        self.status == ReorderStatus::NeedsReorder
    }

    /// 缺貨機率是否高於門檻
    pub fn is_high_risk(&self, threshold: f64) -> bool {
        self.stockout_probability > threshold
    }
}

/// 庫存健康度彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// 商品/門店總數
    pub total_items: usize,

    /// 需要補貨的數量
    pub items_needing_reorder: usize,

    /// 需要補貨的百分比
    pub reorder_percentage: f64,

    /// 建議訂購總金額
    pub total_order_value: Decimal,

    /// 平均距離缺貨天數（只計入有限值）
    pub average_days_until_stockout: DaysUntilStockout,

    /// 高風險數量
    pub high_risk_items: usize,

    /// 高風險百分比
    pub high_risk_percentage: f64,

    /// 使用的高風險門檻
    pub high_risk_threshold: f64,
}

impl HealthSummary {
    /// 創建空的彙總（所有計數為 0）
    pub fn empty(high_risk_threshold: f64) -> Self {
        Self {
            total_items: 0,
            items_needing_reorder: 0,
            reorder_percentage: 0.0,
            total_order_value: Decimal::ZERO,
            average_days_until_stockout: DaysUntilStockout::Unbounded,
            high_risk_items: 0,
            high_risk_percentage: 0.0,
            high_risk_threshold,
        }
    }
}
