//! 經濟訂購量（EOQ）

use replen_core::{ReplenError, Result};

/// 經濟訂購量計算器
pub struct EoqCalculator;

impl EoqCalculator {
    /// 計算經濟訂購量
    ///
    /// - holding_cost = holding_cost_percentage × unit_cost
    /// - EOQ = sqrt(2 × 年需求量 × 訂購成本 / holding_cost)
    ///
    /// holding_cost ≤ 0 或年需求量為負時回傳 `InvalidParameter`，不產生 NaN。
    pub fn compute(
        annual_demand: f64,
        ordering_cost: f64,
        holding_cost_percentage: f64,
        unit_cost: f64,
    ) -> Result<f64> {
        if !annual_demand.is_finite() || annual_demand < 0.0 {
            return Err(ReplenError::InvalidParameter(format!(
                "年需求量不可為負: {}",
                annual_demand
            )));
        }

        if !ordering_cost.is_finite() || ordering_cost < 0.0 {
            return Err(ReplenError::InvalidParameter(format!(
                "訂購成本不可為負: {}",
                ordering_cost
            )));
        }

        let holding_cost = Self::holding_cost(holding_cost_percentage, unit_cost);
        if !holding_cost.is_finite() || holding_cost <= 0.0 {
            return Err(ReplenError::InvalidParameter(format!(
                "持有成本必須大於 0: {} × {} = {}",
                holding_cost_percentage, unit_cost, holding_cost
            )));
        }

        Ok((2.0 * annual_demand * ordering_cost / holding_cost).sqrt())
    }

    /// 單位年持有成本
    pub fn holding_cost(holding_cost_percentage: f64, unit_cost: f64) -> f64 {
        holding_cost_percentage * unit_cost
    }

    /// 由預測期間平均每日需求推算年需求量
    ///
    /// 假設短期預測平均值可代表全年，負值視為 0。
    pub fn annual_demand(average_daily_demand: f64) -> f64 {
        average_daily_demand.max(0.0) * 365.0
    }
}
