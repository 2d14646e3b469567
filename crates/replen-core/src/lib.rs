//! # Replen Core
//!
//! 補貨建議的核心資料模型、配置與協作介面

pub mod config;
pub mod forecast;
pub mod inventory;
pub mod recommendation;
pub mod source;
pub mod stats;

// Re-export 主要類型
pub use config::ReplenishmentConfig;
pub use forecast::{ForecastPoint, ForecastSeries};
pub use inventory::{InventorySnapshot, SnapshotFilter};
pub use recommendation::{DaysUntilStockout, HealthSummary, ReorderResult, ReorderStatus};
pub use source::{ForecastSource, InventorySnapshotLoader};

/// 補貨計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenError {
    /// 計算參數不合法（只影響單筆計算）
    #[error("無效的參數: {0}")]
    InvalidParameter(String),

    /// 庫存資料來源無法讀取（整個請求失敗）
    #[error("庫存資料不可用: {0}")]
    DataUnavailable(String),

    /// 指定商品/門店無法產生預測（該筆略過）
    #[error("無法預測 {product_id}@{}: {reason}", .store_id.as_deref().unwrap_or("*"))]
    ForecastUnavailable {
        product_id: String,
        store_id: Option<String>,
        reason: String,
    },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

impl ReplenError {
    /// 建立 ForecastUnavailable 錯誤
    pub fn forecast_unavailable(
        product_id: &str,
        store_id: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ForecastUnavailable {
            product_id: product_id.to_string(),
            store_id: store_id.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// 是否為單筆層級的錯誤（可略過該筆，不中斷整批）
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::ForecastUnavailable { .. } | Self::InvalidParameter(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReplenError>;
