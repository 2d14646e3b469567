//! 需求預測序列

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ReplenError, Result};

/// 單日預測值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 預測日期
    pub date: NaiveDate,

    /// 預測需求（點估計）
    pub predicted_demand: f64,

    /// 信賴區間下界
    pub lower_bound: f64,

    /// 信賴區間上界
    pub upper_bound: f64,
}

impl ForecastPoint {
    /// 創建新的預測值
    pub fn new(date: NaiveDate, predicted_demand: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            date,
            predicted_demand,
            lower_bound,
            upper_bound,
        }
    }

    /// 檢查 lower ≤ predicted ≤ upper 且皆為有限值
    pub fn is_consistent(&self) -> bool {
        self.predicted_demand.is_finite()
            && self.lower_bound.is_finite()
            && self.upper_bound.is_finite()
            && self.lower_bound <= self.predicted_demand
            && self.predicted_demand <= self.upper_bound
    }
}

/// 一組商品/門店的逐日需求預測
///
/// 日期從最後觀測日的隔天起連續排列，長度至少為 1。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ForecastPoint>", into = "Vec<ForecastPoint>")]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// 創建預測序列（驗證區間一致性）
    pub fn new(points: Vec<ForecastPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ReplenError::InvalidParameter("預測序列不可為空".to_string()));
        }

        if let Some(bad) = points.iter().find(|p| !p.is_consistent()) {
            return Err(ReplenError::InvalidParameter(format!(
                "預測區間不一致 ({}): lower={}, predicted={}, upper={}",
                bad.date, bad.lower_bound, bad.predicted_demand, bad.upper_bound
            )));
        }

        Ok(Self { points })
    }

    /// 從起始日與三條數列創建預測序列
    pub fn from_bounds(
        start_date: NaiveDate,
        predicted: &[f64],
        lower: &[f64],
        upper: &[f64],
    ) -> Result<Self> {
        if predicted.len() != lower.len() || predicted.len() != upper.len() {
            return Err(ReplenError::InvalidParameter(format!(
                "預測數列長度不一致: predicted={}, lower={}, upper={}",
                predicted.len(),
                lower.len(),
                upper.len()
            )));
        }

        let points = start_date
            .iter_days()
            .zip(predicted.iter().zip(lower).zip(upper))
            .map(|(date, ((&p, &l), &u))| ForecastPoint::new(date, p, l, u))
            .collect();

        Self::new(points)
    }

    /// 預測天數
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// 所有預測值
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// 預測起始日
    pub fn start_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// 點估計數列
    pub fn predicted_demand(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_demand).collect()
    }

    /// 下界數列
    pub fn lower_bounds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lower_bound).collect()
    }

    /// 上界數列
    pub fn upper_bounds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.upper_bound).collect()
    }

    /// 平均每日預測需求
    pub fn mean_demand(&self) -> f64 {
        self.points.iter().map(|p| p.predicted_demand).sum::<f64>() / self.points.len() as f64
    }

    /// 以倍率調整整條序列（點估計與上下界同步縮放）
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ReplenError::InvalidParameter(format!(
                "需求倍率必須大於 0: {}",
                factor
            )));
        }

        let points = self
            .points
            .iter()
            .map(|p| {
                ForecastPoint::new(
                    p.date,
                    p.predicted_demand * factor,
                    p.lower_bound * factor,
                    p.upper_bound * factor,
                )
            })
            .collect();

        Ok(Self { points })
    }

    /// 截取前 n 天
    pub fn truncated(&self, days: usize) -> Self {
        let days = days.clamp(1, self.points.len());
        Self {
            points: self.points[..days].to_vec(),
        }
    }
}

impl TryFrom<Vec<ForecastPoint>> for ForecastSeries {
    type Error = ReplenError;

    fn try_from(points: Vec<ForecastPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<ForecastSeries> for Vec<ForecastPoint> {
    fn from(series: ForecastSeries) -> Self {
        series.points
    }
}
