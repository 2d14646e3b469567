//! # Replen Calculation Engine
//!
//! 再訂購點、經濟訂購量、缺貨風險與補貨建議

pub mod engine;
pub mod eoq;
pub mod health;
pub mod reorder;
pub mod stockout;

// Re-export 主要類型
pub use engine::RecommendationEngine;
pub use eoq::EoqCalculator;
pub use health::HealthAggregator;
pub use reorder::{ReorderPoint, ReorderPointCalculator};
pub use stockout::StockoutCalculator;

use replen_core::ReorderResult;
use serde::Serialize;
use uuid::Uuid;

/// 補貨建議計算結果
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    /// 本次計算ID
    pub run_id: Uuid,

    /// 補貨建議（依商品ID、門店ID排序）
    pub results: Vec<ReorderResult>,

    /// 被略過的商品/門店
    pub warnings: Vec<RecommendationWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl RecommendationReport {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            results: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: RecommendationWarning) {
        self.warnings.push(warning);
    }

    /// 被略過的筆數
    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }
}

/// 補貨建議警告
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationWarning {
    pub product_id: String,
    pub store_id: Option<String>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl RecommendationWarning {
    pub fn new(
        product_id: String,
        store_id: Option<String>,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            product_id,
            store_id,
            message,
            severity,
        }
    }

    pub fn warning(product_id: String, store_id: Option<String>, message: String) -> Self {
        Self::new(product_id, store_id, message, WarningSeverity::Warning)
    }

    pub fn error(product_id: String, store_id: Option<String>, message: String) -> Self {
        Self::new(product_id, store_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    /// 預測不可用（資料不足）
    Warning,
    /// 單筆參數不合法
    Error,
}
