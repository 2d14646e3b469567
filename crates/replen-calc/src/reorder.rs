//! 再訂購點與安全庫存計算

use replen_core::stats::{mean, sample_std};
use replen_core::{ReplenError, Result};

/// 再訂購點計算結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderPoint {
    /// 提前期內平均每日需求
    pub average_demand: f64,
    /// 提前期內每日需求的樣本標準差
    pub demand_std: f64,
    /// 安全庫存
    pub safety_stock: f64,
    /// 再訂購點
    pub reorder_point: f64,
}

/// 再訂購點計算器
pub struct ReorderPointCalculator;

impl ReorderPointCalculator {
    /// 計算再訂購點
    ///
    /// 取 `daily_demand` 前 `lead_time` 天：
    /// - safety_stock = safety_stock_factor × std × sqrt(lead_time)
    /// - reorder_point = avg × lead_time + safety_stock
    ///
    /// std 為樣本標準差（ddof = 1），只有一天時為 0。
    /// 負的預測需求會使結果為負，結果下限為 0。
    pub fn compute(
        daily_demand: &[f64],
        safety_stock_factor: f64,
        lead_time: u32,
    ) -> Result<ReorderPoint> {
        if lead_time == 0 {
            return Err(ReplenError::InvalidParameter("提前期必須大於 0".to_string()));
        }

        if !safety_stock_factor.is_finite() || safety_stock_factor < 0.0 {
            return Err(ReplenError::InvalidParameter(format!(
                "安全庫存係數不可為負: {}",
                safety_stock_factor
            )));
        }

        let lead_time_len = lead_time as usize;
        if daily_demand.len() < lead_time_len {
            return Err(ReplenError::InvalidParameter(format!(
                "預測天數 {} 少於提前期 {}",
                daily_demand.len(),
                lead_time
            )));
        }

        let window = &daily_demand[..lead_time_len];
        if window.iter().any(|d| !d.is_finite()) {
            return Err(ReplenError::InvalidParameter(
                "提前期需求包含非有限值".to_string(),
            ));
        }

        let average_demand = mean(window);
        let demand_std = sample_std(window);
        let lead_time_f = lead_time as f64;

        let safety_stock = safety_stock_factor * demand_std * lead_time_f.sqrt();
        let reorder_point = (average_demand * lead_time_f + safety_stock).max(0.0);

        Ok(ReorderPoint {
            average_demand,
            demand_std,
            safety_stock,
            reorder_point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_constant_demand_has_no_safety_stock() {
        // 每日 10，提前期 7 天，無變異
        let result = ReorderPointCalculator::compute(&[10.0; 7], 1.5, 7).unwrap();

        assert_eq!(result.average_demand, 10.0);
        assert_eq!(result.demand_std, 0.0);
        assert_eq!(result.safety_stock, 0.0);
        assert_eq!(result.reorder_point, 70.0);
    }

    #[test]
    fn test_safety_stock_uses_sample_std() {
        // [2, 4, 4, 4, 5, 5, 7, 9] 平均 5，樣本變異數 32/7
        let demand = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = ReorderPointCalculator::compute(&demand, 2.0, 8).unwrap();

        let expected_std = (32.0_f64 / 7.0).sqrt();
        assert!((result.demand_std - expected_std).abs() < 1e-12);
        assert!((result.safety_stock - 2.0 * expected_std * 8.0_f64.sqrt()).abs() < 1e-9);
        assert!((result.reorder_point - (40.0 + result.safety_stock)).abs() < 1e-9);
    }

    #[test]
    fn test_only_lead_time_window_is_used() {
        let mut demand = vec![10.0; 7];
        demand.extend([1000.0; 23]);

        let result = ReorderPointCalculator::compute(&demand, 1.5, 7).unwrap();
        assert_eq!(result.reorder_point, 70.0);
    }

    #[test]
    fn test_single_day_window() {
        let result = ReorderPointCalculator::compute(&[12.0, 30.0], 3.0, 1).unwrap();
        assert_eq!(result.safety_stock, 0.0);
        assert_eq!(result.reorder_point, 12.0);
    }

    #[rstest]
    #[case::zero_lead_time(&[10.0; 7], 1.5, 0)]
    #[case::window_too_short(&[10.0; 3], 1.5, 7)]
    #[case::negative_factor(&[10.0; 7], -1.0, 7)]
    #[case::nan_demand(&[10.0, f64::NAN], 1.5, 2)]
    fn test_invalid_parameters(#[case] demand: &[f64], #[case] factor: f64, #[case] lead_time: u32) {
        let result = ReorderPointCalculator::compute(demand, factor, lead_time);
        assert!(matches!(result, Err(ReplenError::InvalidParameter(_))));
    }

    #[test]
    fn test_negative_forecast_clamped() {
        let result = ReorderPointCalculator::compute(&[-5.0; 3], 1.5, 3).unwrap();
        assert_eq!(result.reorder_point, 0.0);
    }

    proptest! {
        #[test]
        fn reorder_point_is_non_negative(
            demand in prop::collection::vec(-50.0f64..500.0, 1..40),
            factor in 0.0f64..5.0,
            lead_time in 1u32..40,
        ) {
            prop_assume!(demand.len() >= lead_time as usize);
            let result = ReorderPointCalculator::compute(&demand, factor, lead_time).unwrap();
            prop_assert!(result.reorder_point >= 0.0);
        }

        #[test]
        fn reorder_point_non_decreasing_in_safety_factor(
            demand in prop::collection::vec(0.0f64..500.0, 14),
            low in 0.0f64..3.0,
            delta in 0.0f64..3.0,
        ) {
            let a = ReorderPointCalculator::compute(&demand, low, 7).unwrap();
            let b = ReorderPointCalculator::compute(&demand, low + delta, 7).unwrap();
            prop_assert!(b.reorder_point >= a.reorder_point);
        }
    }
}
