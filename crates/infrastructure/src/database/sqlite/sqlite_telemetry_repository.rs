use async_trait::async_trait;
use sentinel_core::{
    models::{
        Alert, LogEntry, LogQuery, MetricQuery, MetricSample, NewAlert, NewLogEntry,
        NewMetricSample,
    },
    traits::TelemetryRepository,
    SentinelError, SentinelResult,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::database::mapping::MappingHelpers;

pub struct SqliteTelemetryRepository {
    pool: SqlitePool,
}

impl SqliteTelemetryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_metric(row: &SqliteRow) -> SentinelResult<MetricSample> {
        Ok(MetricSample {
            id: row.try_get("id")?,
            timestamp: MappingHelpers::timestamp(row, "timestamp")?,
            name: row.try_get("name")?,
            value: row.try_get("value")?,
            labels: MappingHelpers::parse_labels(row, "labels")?,
        })
    }

    fn row_to_log(row: &SqliteRow) -> SentinelResult<LogEntry> {
        Ok(LogEntry {
            id: row.try_get("id")?,
            timestamp: MappingHelpers::timestamp(row, "timestamp")?,
            level: MappingHelpers::parse_enum(row, "level")?,
            service: row.try_get("service")?,
            message: row.try_get("message")?,
        })
    }

    fn row_to_alert(row: &SqliteRow) -> SentinelResult<Alert> {
        Ok(Alert {
            id: row.try_get("id")?,
            severity: MappingHelpers::parse_enum(row, "severity")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            status: MappingHelpers::parse_enum(row, "status")?,
            created_at: MappingHelpers::timestamp(row, "created_at")?,
        })
    }
}

#[async_trait]
impl TelemetryRepository for SqliteTelemetryRepository {
    async fn append_metric(&self, sample: &NewMetricSample) -> SentinelResult<()> {
        let labels = MappingHelpers::serialize_labels(&sample.labels)?;

        sqlx::query("INSERT INTO metrics (timestamp, name, value, labels) VALUES ($1, $2, $3, $4)")
            .bind(MappingHelpers::to_millis(sample.timestamp))
            .bind(&sample.name)
            .bind(sample.value)
            .bind(labels)
            .execute(&self.pool)
            .await
            .map_err(SentinelError::Database)?;

        Ok(())
    }

    async fn list_metrics(&self, query: &MetricQuery) -> SentinelResult<Vec<MetricSample>> {
        let rows = sqlx::query(
            r#"
            SELECT id, timestamp, name, value, labels FROM metrics
            WHERE ($1 IS NULL OR name = $1)
              AND ($2 IS NULL OR timestamp >= $2)
            ORDER BY timestamp DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(query.name.as_deref())
        .bind(query.since.map(MappingHelpers::to_millis))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        debug!("查询指标: name={:?} 返回{}条", query.name, rows.len());
        rows.iter().map(Self::row_to_metric).collect()
    }

    async fn append_log(&self, entry: &NewLogEntry) -> SentinelResult<()> {
        sqlx::query("INSERT INTO logs (timestamp, level, service, message) VALUES ($1, $2, $3, $4)")
            .bind(MappingHelpers::to_millis(entry.timestamp))
            .bind(entry.level.as_str())
            .bind(&entry.service)
            .bind(&entry.message)
            .execute(&self.pool)
            .await
            .map_err(SentinelError::Database)?;

        Ok(())
    }

    async fn list_logs(&self, query: &LogQuery) -> SentinelResult<Vec<LogEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, timestamp, level, service, message FROM logs
            WHERE ($1 IS NULL OR service = $1)
              AND ($2 IS NULL OR level = $2)
            ORDER BY timestamp DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(query.service.as_deref())
        .bind(query.level.map(|level| level.as_str()))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_log).collect()
    }

    async fn list_alerts(&self) -> SentinelResult<Vec<Alert>> {
        let rows = sqlx::query(
            "SELECT id, severity, title, description, status, created_at FROM alerts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_alert).collect()
    }

    async fn create_alert(&self, alert: &NewAlert) -> SentinelResult<Alert> {
        let result = sqlx::query(
            r#"
            INSERT INTO alerts (severity, title, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(alert.severity.as_str())
        .bind(&alert.title)
        .bind(&alert.description)
        .bind(alert.status.as_str())
        .bind(MappingHelpers::to_millis(alert.created_at))
        .execute(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        let created = Alert::from_new(result.last_insert_rowid(), alert);
        debug!("创建告警成功: {} (id={})", created.title, created.id);
        Ok(created)
    }
}
