//! # Replen
//!
//! 零售補貨建議：再訂購點、經濟訂購量、缺貨機率與庫存健康度

pub use replen_calc::{
    RecommendationEngine, RecommendationReport, RecommendationWarning, WarningSeverity,
};
pub use replen_core::{
    DaysUntilStockout, ForecastSeries, ForecastSource, HealthSummary, InventorySnapshot,
    InventorySnapshotLoader, ReorderResult, ReorderStatus, ReplenError, ReplenishmentConfig,
    Result, SnapshotFilter,
};
pub use replen_data::{HistoricalForecaster, SalesTable};
