//! 缺貨機率與缺貨天數

use replen_core::{DaysUntilStockout, ReplenError, Result};
use statrs::function::erf::erfc;

/// 95% 信賴區間的半寬（以標準差計）
pub const CONFIDENCE_95_Z: f64 = 1.96;

/// 缺貨風險計算器
pub struct StockoutCalculator;

impl StockoutCalculator {
    /// 計算預測期間內的缺貨機率
    ///
    /// 第 i 天的累積需求與累積標準差（假設每日誤差互相獨立）：
    /// - cumulative_demand[i] = Σ daily_demand[0..=i]
    /// - cumulative_std[i] = sqrt(Σ daily_std[j]²)
    ///
    /// 當天機率為 Φ((cumulative_demand − current_inventory) / cumulative_std)，
    /// 結果取所有天數中的最大值。累積標準差為 0 時，
    /// 累積需求超過庫存記為 1.0，否則為 0.0。
    pub fn probability(
        current_inventory: f64,
        daily_demand: &[f64],
        daily_std: &[f64],
        days: usize,
    ) -> Result<f64> {
        if days == 0 {
            return Err(ReplenError::InvalidParameter("缺貨機率天數必須大於 0".to_string()));
        }

        if daily_demand.len() < days || daily_std.len() < days {
            return Err(ReplenError::InvalidParameter(format!(
                "預測長度不足 {} 天: demand={}, std={}",
                days,
                daily_demand.len(),
                daily_std.len()
            )));
        }

        if !current_inventory.is_finite() {
            return Err(ReplenError::InvalidParameter(format!(
                "現有庫存不是有限值: {}",
                current_inventory
            )));
        }

        let mut cumulative_demand = 0.0;
        let mut cumulative_var = 0.0;
        let mut max_probability: f64 = 0.0;

        for (&demand, &std) in daily_demand[..days].iter().zip(&daily_std[..days]) {
            if !demand.is_finite() || !std.is_finite() || std < 0.0 {
                return Err(ReplenError::InvalidParameter(format!(
                    "每日需求或標準差不合法: demand={}, std={}",
                    demand, std
                )));
            }

            cumulative_demand += demand;
            cumulative_var += std * std;
            let cumulative_std = cumulative_var.sqrt();

            let day_probability = if cumulative_std == 0.0 {
                if cumulative_demand > current_inventory {
                    1.0
                } else {
                    0.0
                }
            } else {
                standard_normal_cdf((cumulative_demand - current_inventory) / cumulative_std)
            };

            max_probability = max_probability.max(day_probability);
        }

        Ok(max_probability.clamp(0.0, 1.0))
    }

    /// 由信賴區間推算每日標準差
    ///
    /// 假設上下界為 95% 區間（±1.96σ），std = (upper − lower) / 3.92。
    /// 這是近似值，預測模型的區間若非常態或非 95% 則會有偏差。
    pub fn derive_confidence_std(lower_bound: f64, upper_bound: f64) -> Result<f64> {
        if !lower_bound.is_finite() || !upper_bound.is_finite() || upper_bound < lower_bound {
            return Err(ReplenError::InvalidParameter(format!(
                "信賴區間不合法: lower={}, upper={}",
                lower_bound, upper_bound
            )));
        }

        Ok((upper_bound - lower_bound) / (2.0 * CONFIDENCE_95_Z))
    }

    /// 以平均每日需求推算距離缺貨天數
    pub fn days_until_stockout(current_inventory: f64, average_daily_demand: f64) -> DaysUntilStockout {
        if average_daily_demand > 0.0 {
            DaysUntilStockout::Finite(current_inventory.max(0.0) / average_daily_demand)
        } else {
            DaysUntilStockout::Unbounded
        }
    }
}

/// 標準常態分佈累積分佈函數
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}
