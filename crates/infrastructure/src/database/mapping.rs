//! SQLite 行映射辅助函数
//!
//! 时间字段以毫秒时间戳（INTEGER）存储，保证按时间排序与写入顺序一致；
//! 枚举字段以文本存储，读取时通过 `FromStr` 解析。

use chrono::{DateTime, Utc};
use sentinel_core::{models::MetricLabels, SentinelError, SentinelResult};
use sqlx::{sqlite::SqliteRow, Row};
use std::str::FromStr;

pub struct MappingHelpers;

impl MappingHelpers {
    pub fn to_millis(timestamp: DateTime<Utc>) -> i64 {
        timestamp.timestamp_millis()
    }

    pub fn timestamp(row: &SqliteRow, field_name: &str) -> SentinelResult<DateTime<Utc>> {
        let millis: i64 = row.try_get(field_name)?;
        Self::from_millis(millis)
    }

    pub fn optional_timestamp(
        row: &SqliteRow,
        field_name: &str,
    ) -> SentinelResult<Option<DateTime<Utc>>> {
        let millis: Option<i64> = row.try_get(field_name)?;
        millis.map(Self::from_millis).transpose()
    }

    /// 解析文本枚举字段
    pub fn parse_enum<T>(row: &SqliteRow, field_name: &str) -> SentinelResult<T>
    where
        T: FromStr<Err = SentinelError>,
    {
        let text: String = row.try_get(field_name)?;
        text.parse()
    }

    pub fn parse_labels(row: &SqliteRow, field_name: &str) -> SentinelResult<MetricLabels> {
        let json_str: String = row.try_get(field_name)?;
        serde_json::from_str(&json_str)
            .map_err(|e| SentinelError::Serialization(format!("解析指标标签失败: {e}")))
    }

    pub fn serialize_labels(labels: &MetricLabels) -> SentinelResult<String> {
        serde_json::to_string(labels)
            .map_err(|e| SentinelError::Serialization(format!("序列化指标标签失败: {e}")))
    }

    fn from_millis(millis: i64) -> SentinelResult<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| SentinelError::Serialization(format!("无效的时间戳: {millis}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_round_trip_truncates_to_millisecond() {
        let now = Utc::now();
        let millis = MappingHelpers::to_millis(now);
        let restored = MappingHelpers::from_millis(millis).unwrap();
        assert_eq!(restored.timestamp_millis(), now.timestamp_millis());
        assert!(now - restored < chrono::Duration::milliseconds(1));
    }
}
