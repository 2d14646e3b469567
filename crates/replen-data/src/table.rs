//! 銷售/庫存資料表
//!
//! CSV 欄位：
//!   date, product_id, store_id, category, region, inventory_level, units_sold, price
//!
//! store_id 與 region 可為空。

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use replen_core::{
    InventorySnapshot, InventorySnapshotLoader, ReplenError, Result, SnapshotFilter,
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// 單日銷售/庫存紀錄
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product_id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub store_id: Option<String>,
    pub category: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub region: Option<String>,
    pub inventory_level: f64,
    pub units_sold: f64,
    pub price: Decimal,
}

/// 記憶體中的銷售資料表
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// 由紀錄創建資料表
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// 從 CSV 讀取
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (line_num, result) in csv_reader.deserialize().enumerate() {
            let record: SalesRecord = result.map_err(|e| {
                ReplenError::DataUnavailable(format!("CSV 第 {} 行解析失敗: {}", line_num + 2, e))
            })?;
            check_inventory_level(&record)
                .map_err(|e| ReplenError::DataUnavailable(format!("CSV 第 {} 行: {}", line_num + 2, e)))?;
            records.push(record);
        }

        tracing::debug!("讀取銷售紀錄 {} 筆", records.len());
        Ok(Self { records })
    }

    /// 從 CSV 檔案讀取
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            ReplenError::DataUnavailable(format!("無法開啟 '{}': {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    /// 所有紀錄
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 資料表中的最新日期
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// 指定商品/門店的逐日銷量（同日多筆加總，依日期排序）
    pub fn daily_sales(&self, product_id: &str, store_id: Option<&str>) -> BTreeMap<NaiveDate, f64> {
        let mut daily = BTreeMap::new();
        for record in self
            .records
            .iter()
            .filter(|r| r.product_id == product_id && r.store_id.as_deref() == store_id)
        {
            *daily.entry(record.date).or_insert(0.0) += record.units_sold;
        }
        daily
    }
}

/// 彙總中的快照
struct SnapshotAccumulator {
    region: Option<String>,
    inventory: f64,
    price_sum: Decimal,
    price_count: u32,
}

impl InventorySnapshotLoader for SalesTable {
    /// 取整張資料表最新的一天，再依條件篩選並依（商品、門店、品類）彙總：
    /// 庫存加總、單價平均、區域取第一筆。
    ///
    /// 最新一天沒有紀錄的商品不會出現在結果中。
    fn load(&self, filter: &SnapshotFilter) -> Result<Vec<InventorySnapshot>> {
        let Some(as_of) = self.latest_date() else {
            tracing::debug!("銷售資料表為空");
            return Ok(Vec::new());
        };

        let matching: Vec<&SalesRecord> = self
            .records
            .iter()
            .filter(|r| r.date == as_of && filter.matches(&r.product_id, r.store_id.as_deref()))
            .collect();

        if matching.is_empty() {
            tracing::debug!("{} 沒有符合條件的庫存紀錄: {:?}", as_of, filter);
            return Ok(Vec::new());
        }

        for record in &matching {
            check_inventory_level(record).map_err(ReplenError::DataUnavailable)?;
        }

        let mut groups: BTreeMap<(String, Option<String>, String), SnapshotAccumulator> =
            BTreeMap::new();
        for record in matching {
            let key = (
                record.product_id.clone(),
                record.store_id.clone(),
                record.category.clone(),
            );
            let entry = groups.entry(key).or_insert_with(|| SnapshotAccumulator {
                region: record.region.clone(),
                inventory: 0.0,
                price_sum: Decimal::ZERO,
                price_count: 0,
            });
            entry.inventory += record.inventory_level;
            entry.price_sum += record.price;
            entry.price_count += 1;
        }

        let snapshots: Vec<InventorySnapshot> = groups
            .into_iter()
            .map(|((product_id, store_id, category), acc)| InventorySnapshot {
                product_id,
                store_id,
                category,
                region: acc.region,
                current_inventory: acc.inventory,
                unit_price: acc.price_sum / Decimal::from(acc.price_count),
                as_of,
            })
            .collect();

        tracing::debug!("載入 {} 的庫存快照 {} 筆", as_of, snapshots.len());
        Ok(snapshots)
    }
}

/// 庫存量必須為非負的有限值
fn check_inventory_level(record: &SalesRecord) -> std::result::Result<(), String> {
    if record.inventory_level.is_finite() && record.inventory_level >= 0.0 {
        Ok(())
    } else {
        Err(format!(
            "{}@{} 在 {} 的庫存量不合法: {}",
            record.product_id,
            record.store_id.as_deref().unwrap_or("*"),
            record.date,
            record.inventory_level
        ))
    }
}

/// 空字串視為 None
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
