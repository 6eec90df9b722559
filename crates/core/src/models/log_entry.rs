use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::LOGS_QUERY_LIMIT;

/// 模拟集群中的日志条目（只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// 产生日志的服务或组件
    pub service: String,
    pub message: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

text_enum!(LogLevel {
    Info => "info",
    Warn => "warn",
    Error => "error",
});

/// 待写入的日志条目
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub level: LogLevel,
    pub service: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl NewLogEntry {
    pub fn new(
        level: LogLevel,
        service: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            service: service.into(),
            message: message.into(),
            timestamp,
        }
    }

    pub fn info(service: impl Into<String>, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(LogLevel::Info, service, message, timestamp)
    }

    pub fn warn(service: impl Into<String>, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(LogLevel::Warn, service, message, timestamp)
    }

    pub fn error(service: impl Into<String>, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(LogLevel::Error, service, message, timestamp)
    }
}

impl LogEntry {
    pub fn from_new(id: i64, entry: &NewLogEntry) -> Self {
        Self {
            id,
            timestamp: entry.timestamp,
            level: entry.level,
            service: entry.service.clone(),
            message: entry.message.clone(),
        }
    }
}

/// 日志查询条件，结果按时间倒序
#[derive(Debug, Clone, PartialEq)]
pub struct LogQuery {
    pub service: Option<String>,
    pub level: Option<LogLevel>,
    pub limit: i64,
}

impl LogQuery {
    pub fn new(service: Option<String>, level: Option<LogLevel>) -> Self {
        Self {
            service,
            level,
            limit: LOGS_QUERY_LIMIT,
        }
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.service.as_ref().map_or(true, |s| &entry.service == s)
            && self.level.map_or(true, |l| entry.level == l)
    }
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}
