use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sentinel_core::{
    models::{ChaosExperiment, ExperimentStatus, NewChaosExperiment},
    traits::ChaosRepository,
    SentinelError, SentinelResult,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::database::mapping::MappingHelpers;

const EXPERIMENT_COLUMNS: &str = "id, title, type, target_service, status, duration, started_at";

pub struct SqliteChaosRepository {
    pool: SqlitePool,
}

impl SqliteChaosRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_experiment(row: &SqliteRow) -> SentinelResult<ChaosExperiment> {
        Ok(ChaosExperiment {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            experiment_type: MappingHelpers::parse_enum(row, "type")?,
            target_service: row.try_get("target_service")?,
            status: MappingHelpers::parse_enum(row, "status")?,
            duration: row.try_get("duration")?,
            started_at: MappingHelpers::optional_timestamp(row, "started_at")?,
        })
    }
}

#[async_trait]
impl ChaosRepository for SqliteChaosRepository {
    async fn create_experiment(
        &self,
        experiment: &NewChaosExperiment,
        started_at: DateTime<Utc>,
    ) -> SentinelResult<ChaosExperiment> {
        let result = sqlx::query(
            r#"
            INSERT INTO chaos_experiments (title, type, target_service, status, duration, started_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&experiment.title)
        .bind(experiment.experiment_type.as_str())
        .bind(&experiment.target_service)
        .bind(ExperimentStatus::Running.as_str())
        .bind(experiment.duration)
        .bind(MappingHelpers::to_millis(started_at))
        .execute(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        let id = result.last_insert_rowid();
        debug!("创建混沌实验成功: {} (id={})", experiment.title, id);
        self.get_experiment(id)
            .await?
            .ok_or(SentinelError::ExperimentNotFound { id })
    }

    async fn get_experiment(&self, id: i64) -> SentinelResult<Option<ChaosExperiment>> {
        let row = sqlx::query(&format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM chaos_experiments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        row.as_ref().map(Self::row_to_experiment).transpose()
    }

    async fn list_experiments(&self) -> SentinelResult<Vec<ChaosExperiment>> {
        let rows = sqlx::query(&format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM chaos_experiments ORDER BY started_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_experiment).collect()
    }

    async fn list_experiments_by_status(
        &self,
        status: ExperimentStatus,
    ) -> SentinelResult<Vec<ChaosExperiment>> {
        let rows = sqlx::query(&format!(
            "SELECT {EXPERIMENT_COLUMNS} FROM chaos_experiments WHERE status = $1 ORDER BY id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_experiment).collect()
    }

    async fn update_experiment_status(
        &self,
        id: i64,
        status: ExperimentStatus,
    ) -> SentinelResult<()> {
        let result = sqlx::query("UPDATE chaos_experiments SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(SentinelError::Database)?;

        if result.rows_affected() == 0 {
            return Err(SentinelError::ExperimentNotFound { id });
        }

        debug!("更新混沌实验状态: id={} status={}", id, status);
        Ok(())
    }
}
