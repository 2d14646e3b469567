//! 庫存快照模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 最新觀測日的庫存狀態（每個商品/門店一筆）
///
/// 每次請求重新計算，不做原地修改也不持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// 商品ID
    pub product_id: String,

    /// 門店ID（跨門店彙總時為 None）
    pub store_id: Option<String>,

    /// 品類
    pub category: String,

    /// 區域
    pub region: Option<String>,

    /// 現有庫存
    pub current_inventory: f64,

    /// 單價
    pub unit_price: Decimal,

    /// 快照日期
    pub as_of: NaiveDate,
}

impl InventorySnapshot {
    /// 創建新的庫存快照
    pub fn new(
        product_id: String,
        category: String,
        current_inventory: f64,
        unit_price: Decimal,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            product_id,
            store_id: None,
            category,
            region: None,
            current_inventory,
            unit_price,
            as_of,
        }
    }

    /// 建構器模式：設置門店
    pub fn with_store_id(mut self, store_id: String) -> Self {
        self.store_id = Some(store_id);
        self
    }

    /// 建構器模式：設置區域
    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }

    /// 排序鍵（商品ID、門店ID）
    pub fn sort_key(&self) -> (&str, Option<&str>) {
        (self.product_id.as_str(), self.store_id.as_deref())
    }
}

/// 快照篩選條件（空條件代表全部商品/門店）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFilter {
    /// 商品ID
    pub product_id: Option<String>,

    /// 門店ID
    pub store_id: Option<String>,
}

impl SnapshotFilter {
    /// 不篩選
    pub fn all() -> Self {
        Self::default()
    }

    /// 建構器模式：篩選商品
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// 建構器模式：篩選門店
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// 檢查商品/門店是否符合條件
    pub fn matches(&self, product_id: &str, store_id: Option<&str>) -> bool {
        let product_ok = self
            .product_id
            .as_deref()
            .map_or(true, |wanted| wanted == product_id);
        let store_ok = self
            .store_id
            .as_deref()
            .map_or(true, |wanted| Some(wanted) == store_id);
        product_ok && store_ok
    }
}
