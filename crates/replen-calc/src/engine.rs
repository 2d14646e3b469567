//! 補貨建議引擎

use rayon::prelude::*;
use replen_core::{
    ForecastSeries, ForecastSource, HealthSummary, InventorySnapshot, InventorySnapshotLoader,
    ReorderResult, ReorderStatus, ReplenError, ReplenishmentConfig, Result, SnapshotFilter,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{
    EoqCalculator, HealthAggregator, RecommendationReport, RecommendationWarning,
    ReorderPointCalculator, StockoutCalculator,
};

/// 補貨建議引擎
///
/// 持有配置與兩個協作者（庫存快照來源、需求預測來源），
/// 每次請求重新載入快照並逐筆計算，不保留狀態。
pub struct RecommendationEngine<'a> {
    /// 補貨參數
    config: ReplenishmentConfig,

    /// 庫存快照來源
    snapshots: &'a dyn InventorySnapshotLoader,

    /// 需求預測來源
    forecasts: &'a dyn ForecastSource,
}

impl<'a> RecommendationEngine<'a> {
    /// 創建新的補貨建議引擎（驗證配置）
    pub fn new(
        config: ReplenishmentConfig,
        snapshots: &'a dyn InventorySnapshotLoader,
        forecasts: &'a dyn ForecastSource,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            snapshots,
            forecasts,
        })
    }

    /// 產生補貨建議
    ///
    /// `forecast_days` 為 None 時使用配置的預測天數。
    /// 單筆預測失敗只會略過該筆並記錄警告；快照來源失敗則整個請求失敗。
    pub fn get_recommendations(
        &self,
        filter: &SnapshotFilter,
        forecast_days: Option<u32>,
    ) -> Result<RecommendationReport> {
        let horizon = forecast_days.unwrap_or(self.config.forecast_days);
        self.validate_horizon(horizon)?;

        let start_time = std::time::Instant::now();

        // Step 1: 載入庫存快照
        let mut snapshots = self.snapshots.load(filter)?;
        snapshots.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        tracing::info!(
            "開始補貨計算：快照 {} 筆，預測 {} 天，提前期 {} 天",
            snapshots.len(),
            horizon,
            self.config.lead_time_days
        );

        let mut report = RecommendationReport::empty();
        if snapshots.is_empty() {
            report.calculation_time_ms = Some(start_time.elapsed().as_millis());
            return Ok(report);
        }

        // Step 2: 逐筆預測與計算（並行，collect 保持快照順序）
        let outcomes: Vec<Result<ReorderResult>> = snapshots
            .par_iter()
            .map(|snapshot| self.recommend(snapshot, horizon))
            .collect();

        // Step 3: 收集結果，單筆錯誤轉為警告
        for (snapshot, outcome) in snapshots.iter().zip(outcomes) {
            match outcome {
                Ok(result) => report.results.push(result),
                Err(err @ ReplenError::ForecastUnavailable { .. }) => {
                    tracing::warn!("略過 {}: {}", describe(snapshot), err);
                    report.add_warning(RecommendationWarning::warning(
                        snapshot.product_id.clone(),
                        snapshot.store_id.clone(),
                        err.to_string(),
                    ));
                }
                Err(err @ ReplenError::InvalidParameter(_)) => {
                    tracing::warn!("略過 {}（參數不合法）: {}", describe(snapshot), err);
                    report.add_warning(RecommendationWarning::error(
                        snapshot.product_id.clone(),
                        snapshot.store_id.clone(),
                        err.to_string(),
                    ));
                }
                Err(err) => return Err(err),
            }
        }

        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "補貨計算完成，耗時 {:?}：建議 {} 筆，略過 {} 筆",
            start_time.elapsed(),
            report.results.len(),
            report.skipped()
        );

        Ok(report)
    }

    /// 計算庫存健康度
    pub fn get_inventory_health(
        &self,
        filter: &SnapshotFilter,
        forecast_days: Option<u32>,
    ) -> Result<HealthSummary> {
        let report = self.get_recommendations(filter, forecast_days)?;
        Ok(HealthAggregator::summarize(
            &report.results,
            self.config.high_risk_threshold,
        ))
    }

    /// 單筆：取得預測並計算補貨建議
    fn recommend(&self, snapshot: &InventorySnapshot, horizon: u32) -> Result<ReorderResult> {
        let series = self.forecasts.predict(
            &snapshot.product_id,
            snapshot.store_id.as_deref(),
            horizon,
        )?;

        let horizon_len = horizon as usize;
        if series.horizon() < horizon_len {
            return Err(ReplenError::forecast_unavailable(
                &snapshot.product_id,
                snapshot.store_id.as_deref(),
                format!("預測只有 {} 天，需要 {} 天", series.horizon(), horizon),
            ));
        }

        self.evaluate(snapshot, &series.truncated(horizon_len))
    }

    /// 以快照與預測序列計算補貨建議（純計算）
    pub fn evaluate(
        &self,
        snapshot: &InventorySnapshot,
        series: &ForecastSeries,
    ) -> Result<ReorderResult> {
        let config = &self.config;

        if !snapshot.current_inventory.is_finite() || snapshot.current_inventory < 0.0 {
            return Err(ReplenError::InvalidParameter(format!(
                "現有庫存必須為非負的有限值: {}",
                snapshot.current_inventory
            )));
        }

        // 外部訊號調整
        let impact = config.demand_impact(&snapshot.category);
        let adjusted;
        let series = if impact != 1.0 {
            adjusted = series.scaled(impact)?;
            &adjusted
        } else {
            series
        };

        let predicted = series.predicted_demand();
        let daily_std = series
            .points()
            .iter()
            .map(|p| StockoutCalculator::derive_confidence_std(p.lower_bound, p.upper_bound))
            .collect::<Result<Vec<f64>>>()?;

        let average_daily_demand = series.mean_demand();
        let annual_demand = EoqCalculator::annual_demand(average_daily_demand);

        let reorder = ReorderPointCalculator::compute(
            &predicted,
            config.safety_stock_factor,
            config.lead_time_days,
        )?;

        let unit_cost = snapshot.unit_price.to_f64().ok_or_else(|| {
            ReplenError::InvalidParameter(format!("單價無法轉換: {}", snapshot.unit_price))
        })?;
        let economic_order_quantity = EoqCalculator::compute(
            annual_demand,
            config.ordering_cost,
            config.holding_cost_percentage,
            unit_cost,
        )?;

        let current_inventory = snapshot.current_inventory;
        let days_until_stockout =
            StockoutCalculator::days_until_stockout(current_inventory, average_daily_demand);
        let stockout_probability = StockoutCalculator::probability(
            current_inventory,
            &predicted,
            &daily_std,
            series.horizon(),
        )?;

        let status = ReorderStatus::evaluate(current_inventory, reorder.reorder_point);
        let optimal_order_quantity = match status {
            ReorderStatus::NeedsReorder => economic_order_quantity,
            ReorderStatus::Sufficient => 0.0,
        };
        let order_value = order_value(optimal_order_quantity, snapshot.unit_price)?;

        tracing::debug!(
            "{}: 再訂購點 {:.2}，EOQ {:.2}，缺貨機率 {:.3}，狀態 {:?}",
            describe(snapshot),
            reorder.reorder_point,
            economic_order_quantity,
            stockout_probability,
            status
        );

        Ok(ReorderResult {
            product_id: snapshot.product_id.clone(),
            store_id: snapshot.store_id.clone(),
            category: snapshot.category.clone(),
            region: snapshot.region.clone(),
            current_inventory,
            unit_price: snapshot.unit_price,
            average_daily_demand,
            annual_demand,
            safety_stock: reorder.safety_stock,
            reorder_point: reorder.reorder_point,
            economic_order_quantity,
            optimal_order_quantity,
            order_value,
            days_until_stockout,
            stockout_probability,
            status,
        })
    }

    /// 預測天數必須涵蓋提前期
    fn validate_horizon(&self, horizon: u32) -> Result<()> {
        if horizon < self.config.lead_time_days {
            return Err(ReplenError::InvalidParameter(format!(
                "預測天數 {} 少於提前期 {}",
                horizon, self.config.lead_time_days
            )));
        }
        Ok(())
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ReplenishmentConfig {
        &self.config
    }
}

/// 訂購金額（四捨五入到分）
fn order_value(quantity: f64, unit_price: Decimal) -> Result<Decimal> {
    let quantity = Decimal::try_from(quantity)
        .map_err(|e| ReplenError::InvalidParameter(format!("訂購量無法轉換 {}: {}", quantity, e)))?;

    quantity
        .checked_mul(unit_price)
        .map(|value| value.round_dp(2))
        .ok_or_else(|| ReplenError::InvalidParameter("訂購金額溢位".to_string()))
}

fn describe(snapshot: &InventorySnapshot) -> String {
    format!(
        "{}@{}",
        snapshot.product_id,
        snapshot.store_id.as_deref().unwrap_or("*")
    )
}
