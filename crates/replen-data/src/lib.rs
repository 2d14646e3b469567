//! # Replen Data
//!
//! 銷售資料表載入、庫存快照與基準需求預測

pub mod forecaster;
pub mod table;

// Re-export 主要類型
pub use forecaster::HistoricalForecaster;
pub use table::{SalesRecord, SalesTable};
