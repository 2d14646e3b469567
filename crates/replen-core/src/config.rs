//! 補貨參數配置

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ReplenError, Result};

/// 補貨計算參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplenishmentConfig {
    /// 提前期（天）
    pub lead_time_days: u32,

    /// 安全庫存係數（標準差倍數）
    pub safety_stock_factor: f64,

    /// 每次訂購成本
    pub ordering_cost: f64,

    /// 年持有成本佔單價的比例
    pub holding_cost_percentage: f64,

    /// 高缺貨風險門檻（缺貨機率高於此值視為高風險）
    pub high_risk_threshold: f64,

    /// 預測天數
    pub forecast_days: u32,

    /// 外部訊號（天氣、社群趨勢）換算的品類需求倍率
    ///
    /// 未列出的品類倍率為 1.0
    pub demand_impacts: BTreeMap<String, f64>,
}

impl Default for ReplenishmentConfig {
    fn default() -> Self {
        Self {
            lead_time_days: 7,
            safety_stock_factor: 1.5,
            ordering_cost: 25.0,
            holding_cost_percentage: 0.25,
            high_risk_threshold: 0.25,
            forecast_days: 30,
            demand_impacts: BTreeMap::new(),
        }
    }
}

impl ReplenishmentConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ReplenError::InvalidConfig(format!("JSON 解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置安全庫存係數
    pub fn with_safety_stock_factor(mut self, factor: f64) -> Self {
        self.safety_stock_factor = factor;
        self
    }

    /// 建構器模式：設置訂購成本
    pub fn with_ordering_cost(mut self, cost: f64) -> Self {
        self.ordering_cost = cost;
        self
    }

    /// 建構器模式：設置持有成本比例
    pub fn with_holding_cost_percentage(mut self, percentage: f64) -> Self {
        self.holding_cost_percentage = percentage;
        self
    }

    /// 建構器模式：設置高風險門檻
    pub fn with_high_risk_threshold(mut self, threshold: f64) -> Self {
        self.high_risk_threshold = threshold;
        self
    }

    /// 建構器模式：設置預測天數
    pub fn with_forecast_days(mut self, days: u32) -> Self {
        self.forecast_days = days;
        self
    }

    /// 建構器模式：設置品類需求倍率
    pub fn with_demand_impact(mut self, category: impl Into<String>, factor: f64) -> Self {
        self.demand_impacts.insert(category.into(), factor);
        self
    }

    /// 取得品類需求倍率
    pub fn demand_impact(&self, category: &str) -> f64 {
        self.demand_impacts.get(category).copied().unwrap_or(1.0)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.lead_time_days == 0 {
            return Err(ReplenError::InvalidConfig("提前期必須大於 0".to_string()));
        }

        if !self.safety_stock_factor.is_finite() || self.safety_stock_factor < 0.0 {
            return Err(ReplenError::InvalidConfig(format!(
                "安全庫存係數不可為負: {}",
                self.safety_stock_factor
            )));
        }

        if !self.ordering_cost.is_finite() || self.ordering_cost < 0.0 {
            return Err(ReplenError::InvalidConfig(format!(
                "訂購成本不可為負: {}",
                self.ordering_cost
            )));
        }

        if !self.holding_cost_percentage.is_finite() || self.holding_cost_percentage <= 0.0 {
            return Err(ReplenError::InvalidConfig(format!(
                "持有成本比例必須大於 0: {}",
                self.holding_cost_percentage
            )));
        }

        if !(0.0..=1.0).contains(&self.high_risk_threshold) {
            return Err(ReplenError::InvalidConfig(format!(
                "高風險門檻必須介於 0 與 1: {}",
                self.high_risk_threshold
            )));
        }

        if self.forecast_days < self.lead_time_days {
            return Err(ReplenError::InvalidConfig(format!(
                "預測天數 {} 少於提前期 {}",
                self.forecast_days, self.lead_time_days
            )));
        }

        if let Some((category, factor)) = self
            .demand_impacts
            .iter()
            .find(|(_, f)| !f.is_finite() || **f <= 0.0)
        {
            return Err(ReplenError::InvalidConfig(format!(
                "品類 {} 的需求倍率必須大於 0: {}",
                category, factor
            )));
        }

        Ok(())
    }
}
