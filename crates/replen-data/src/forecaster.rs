//! 以歷史銷量為基礎的需求預測

use chrono::{Datelike, NaiveDate};
use replen_core::stats::{mean, sample_std};
use replen_core::{ForecastSeries, ForecastSource, ReplenError, Result};

use crate::table::SalesTable;

/// 95% 區間的 z 值
const Z_95: f64 = 1.96;

/// 同星期幾至少要有幾筆才採用星期平均
const MIN_WEEKDAY_SAMPLES: usize = 2;

/// 歷史平均預測器
///
/// 每個未來日期取視窗內同星期幾的平均銷量（樣本不足時用整體平均），
/// 上下界為點估計 ± 1.96 × 視窗樣本標準差。
#[derive(Debug, Clone)]
pub struct HistoricalForecaster<'a> {
    table: &'a SalesTable,

    /// 最少歷史天數
    min_history_days: usize,

    /// 取最近幾個觀測日
    window_days: usize,
}

impl<'a> HistoricalForecaster<'a> {
    /// 創建預測器（預設至少 14 天歷史，視窗 28 天）
    pub fn new(table: &'a SalesTable) -> Self {
        Self {
            table,
            min_history_days: 14,
            window_days: 28,
        }
    }

    /// 建構器模式：設置最少歷史天數
    pub fn with_min_history_days(mut self, days: usize) -> Self {
        self.min_history_days = days.max(1);
        self
    }

    /// 建構器模式：設置視窗天數
    pub fn with_window_days(mut self, days: usize) -> Self {
        self.window_days = days.max(1);
        self
    }
}

impl ForecastSource for HistoricalForecaster<'_> {
    fn predict(
        &self,
        product_id: &str,
        store_id: Option<&str>,
        horizon_days: u32,
    ) -> Result<ForecastSeries> {
        if horizon_days == 0 {
            return Err(ReplenError::InvalidParameter("預測天數必須大於 0".to_string()));
        }

        let daily = self.table.daily_sales(product_id, store_id);
        if daily.len() < self.min_history_days {
            return Err(ReplenError::forecast_unavailable(
                product_id,
                store_id,
                format!(
                    "歷史資料只有 {} 天，至少需要 {} 天",
                    daily.len(),
                    self.min_history_days
                ),
            ));
        }

        let window: Vec<(NaiveDate, f64)> = daily
            .into_iter()
            .rev()
            .take(self.window_days)
            .collect();
        let Some(&(last_date, _)) = window.first() else {
            return Err(ReplenError::forecast_unavailable(product_id, store_id, "沒有歷史資料"));
        };
        let Some(start_date) = last_date.succ_opt() else {
            return Err(ReplenError::forecast_unavailable(product_id, store_id, "日期溢出"));
        };

        let values: Vec<f64> = window.iter().map(|(_, v)| *v).collect();
        let overall_mean = mean(&values);
        let half_width = Z_95 * sample_std(&values);

        let mut predicted = Vec::with_capacity(horizon_days as usize);
        let mut lower = Vec::with_capacity(horizon_days as usize);
        let mut upper = Vec::with_capacity(horizon_days as usize);

        for date in start_date.iter_days().take(horizon_days as usize) {
            let same_weekday: Vec<f64> = window
                .iter()
                .filter(|(d, _)| d.weekday() == date.weekday())
                .map(|(_, v)| *v)
                .collect();

            let base = if same_weekday.len() >= MIN_WEEKDAY_SAMPLES {
                mean(&same_weekday)
            } else {
                overall_mean
            };
            let point = base.max(0.0);

            predicted.push(point);
            lower.push(point - half_width);
            upper.push(point + half_width);
        }

        tracing::debug!(
            "預測 {}@{}：歷史 {} 天，平均 {:.2}，區間半寬 {:.2}",
            product_id,
            store_id.unwrap_or("*"),
            values.len(),
            overall_mean,
            half_width
        );

        ForecastSeries::from_bounds(start_date, &predicted, &lower, &upper)
    }
}
