use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    METRICS_BY_NAME_QUERY_LIMIT, METRICS_QUERY_LIMIT, METRIC_REQUESTS_TOTAL,
    METRIC_REQUEST_DURATION,
};

/// 指标标签集合，例如 `{ service: "frontend", status: "200" }`
pub type MetricLabels = BTreeMap<String, String>;

/// 指标样本（只追加，不修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub labels: MetricLabels,
}

impl MetricSample {
    pub fn from_new(id: i64, sample: &NewMetricSample) -> Self {
        Self {
            id,
            timestamp: sample.timestamp,
            name: sample.name.clone(),
            value: sample.value,
            labels: sample.labels.clone(),
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// 待写入的指标样本
#[derive(Debug, Clone, PartialEq)]
pub struct NewMetricSample {
    pub name: String,
    pub value: f64,
    pub labels: MetricLabels,
    pub timestamp: DateTime<Utc>,
}

impl NewMetricSample {
    /// 请求延迟样本
    pub fn request_duration(service: &str, value: f64, timestamp: DateTime<Utc>) -> Self {
        let mut labels = MetricLabels::new();
        labels.insert("service".to_string(), service.to_string());
        Self {
            name: METRIC_REQUEST_DURATION.to_string(),
            value,
            labels,
            timestamp,
        }
    }

    /// 按状态码划分的请求数样本
    pub fn requests_total(
        service: &str,
        status_code: &str,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut labels = MetricLabels::new();
        labels.insert("service".to_string(), service.to_string());
        labels.insert("status".to_string(), status_code.to_string());
        Self {
            name: METRIC_REQUESTS_TOTAL.to_string(),
            value,
            labels,
            timestamp,
        }
    }
}

/// 指标查询的时间窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricRange {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "24h")]
    TwentyFourHours,
}

text_enum!(MetricRange {
    OneHour => "1h",
    SixHours => "6h",
    TwentyFourHours => "24h",
});

impl MetricRange {
    pub fn duration(&self) -> Duration {
        match self {
            MetricRange::OneHour => Duration::hours(1),
            MetricRange::SixHours => Duration::hours(6),
            MetricRange::TwentyFourHours => Duration::hours(24),
        }
    }
}

/// 指标查询条件，结果按时间倒序
#[derive(Debug, Clone, PartialEq)]
pub struct MetricQuery {
    pub name: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl MetricQuery {
    /// 按名称过滤时返回50条，否则返回100条
    pub fn new(name: Option<String>, range: Option<MetricRange>, now: DateTime<Utc>) -> Self {
        let limit = if name.is_some() {
            METRICS_BY_NAME_QUERY_LIMIT
        } else {
            METRICS_QUERY_LIMIT
        };
        Self {
            name,
            since: range.map(|r| now - r.duration()),
            limit,
        }
    }

    pub fn matches(&self, sample: &MetricSample) -> bool {
        if let Some(name) = &self.name {
            if &sample.name != name {
                return false;
            }
        }
        if let Some(since) = self.since {
            if sample.timestamp < since {
                return false;
            }
        }
        true
    }
}

impl Default for MetricQuery {
    fn default() -> Self {
        Self {
            name: None,
            since: None,
            limit: METRICS_QUERY_LIMIT,
        }
    }
}
