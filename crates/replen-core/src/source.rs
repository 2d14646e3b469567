//! 協作介面：庫存快照來源與需求預測來源

use crate::{ForecastSeries, InventorySnapshot, Result, SnapshotFilter};

/// 庫存快照來源
pub trait InventorySnapshotLoader: Send + Sync {
    /// 載入符合條件的最新庫存快照，依商品ID、門店ID排序
    ///
    /// 資料來源無法讀取時回傳 `DataUnavailable`；沒有符合的資料回傳空列表。
    fn load(&self, filter: &SnapshotFilter) -> Result<Vec<InventorySnapshot>>;
}

/// 需求預測來源
///
/// 背後可以是單一統計模型或集成模型，呼叫端只依賴點估計與上下界。
pub trait ForecastSource: Send + Sync {
    /// 預測指定商品/門店未來 `horizon_days` 天的需求
    ///
    /// 歷史資料不足時回傳 `ForecastUnavailable`。
    fn predict(
        &self,
        product_id: &str,
        store_id: Option<&str>,
        horizon_days: u32,
    ) -> Result<ForecastSeries>;
}
