//! 基本統計函數

use statrs::statistics::Statistics;

/// 平均值（空數列為 0）
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.mean()
}

/// 樣本標準差（ddof = 1），少於兩筆時為 0
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.std_dev()
}
