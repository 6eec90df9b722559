use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 混沌实验记录
///
/// 由触发入口创建（状态为 `running`，`started_at` 为创建时刻），
/// 此后只有生命周期管理器可以修改其状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosExperiment {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub experiment_type: ExperimentType,
    pub target_service: String,
    pub status: ExperimentStatus,
    /// 持续时间（秒），为空时使用配置的默认值
    pub duration: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
}

/// 混沌实验类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperimentType {
    PodKill,
    NetworkLatency,
    CpuStress,
}

text_enum!(ExperimentType {
    PodKill => "pod-kill",
    NetworkLatency => "network-latency",
    CpuStress => "cpu-stress",
});

/// 混沌实验状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    Idle,
    Running,
    Completed,
}

text_enum!(ExperimentStatus {
    Idle => "idle",
    Running => "running",
    Completed => "completed",
});

impl ExperimentStatus {
    /// 状态只能按 idle -> running -> completed 顺序推进
    pub fn can_transition_to(&self, next: ExperimentStatus) -> bool {
        matches!(
            (self, next),
            (ExperimentStatus::Idle, ExperimentStatus::Running)
                | (ExperimentStatus::Running, ExperimentStatus::Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExperimentStatus::Completed)
    }
}

/// 待创建的混沌实验
#[derive(Debug, Clone, PartialEq)]
pub struct NewChaosExperiment {
    pub title: String,
    pub experiment_type: ExperimentType,
    pub target_service: String,
    pub duration: Option<i32>,
}

impl ChaosExperiment {
    /// 以 `running` 状态落地一条新实验
    pub fn start(id: i64, new_experiment: &NewChaosExperiment, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_experiment.title.clone(),
            experiment_type: new_experiment.experiment_type,
            target_service: new_experiment.target_service.clone(),
            status: ExperimentStatus::Running,
            duration: new_experiment.duration,
            started_at: Some(started_at),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, ExperimentStatus::Running)
    }

    /// 实际生效的持续时间
    pub fn effective_duration(&self, default_seconds: i64) -> Duration {
        let seconds = self.duration.map(i64::from).unwrap_or(default_seconds);
        Duration::seconds(seconds)
    }

    /// 已运行时长，缺少开始时间时为 `None`
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.started_at.map(|started_at| now - started_at)
    }

    /// 已运行时长达到持续时间即视为过期；缺少开始时间的记录直接过期
    pub fn is_expired(&self, now: DateTime<Utc>, default_seconds: i64) -> bool {
        match self.elapsed(now) {
            Some(elapsed) => elapsed >= self.effective_duration(default_seconds),
            None => true,
        }
    }
}
