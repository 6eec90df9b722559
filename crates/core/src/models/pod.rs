use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pod实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub id: i64,
    pub name: String,
    pub namespace: String,
    /// 待调度的Pod可能尚未绑定节点
    pub node_id: Option<i64>,
    pub service: String,
    pub status: PodStatus,
    /// 重启次数，只增不减
    pub restarts: i32,
    /// mCPU
    pub cpu_request: i32,
    /// MiB
    pub memory_request: i32,
    pub created_at: DateTime<Utc>,
}

/// Pod状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodStatus {
    Running,
    Pending,
    CrashLoopBackOff,
    Terminating,
    Unknown,
}

text_enum!(PodStatus {
    Running => "Running",
    Pending => "Pending",
    CrashLoopBackOff => "CrashLoopBackOff",
    Terminating => "Terminating",
    Unknown => "Unknown",
});

impl PodStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, PodStatus::Running)
    }
}

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_CPU_REQUEST: i32 = 100;
pub const DEFAULT_MEMORY_REQUEST: i32 = 128;

/// 待创建的Pod
#[derive(Debug, Clone, PartialEq)]
pub struct NewPod {
    pub name: String,
    pub namespace: String,
    pub node_id: Option<i64>,
    pub service: String,
    pub status: PodStatus,
    pub cpu_request: i32,
    pub memory_request: i32,
}

impl NewPod {
    /// 创建运行中的Pod
    pub fn running(name: impl Into<String>, node_id: Option<i64>, service: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            node_id,
            service: service.into(),
            status: PodStatus::Running,
            cpu_request: DEFAULT_CPU_REQUEST,
            memory_request: DEFAULT_MEMORY_REQUEST,
        }
    }

    pub fn with_status(mut self, status: PodStatus) -> Self {
        self.status = status;
        self
    }
}

impl Pod {
    pub fn from_new(id: i64, new_pod: &NewPod, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_pod.name.clone(),
            namespace: new_pod.namespace.clone(),
            node_id: new_pod.node_id,
            service: new_pod.service.clone(),
            status: new_pod.status,
            restarts: 0,
            cpu_request: new_pod.cpu_request,
            memory_request: new_pod.memory_request,
            created_at,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// 自愈后的重启次数
    pub fn healed_restarts(&self) -> i32 {
        self.restarts.max(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_pod_status_round_trip_text() {
        for status in PodStatus::ALL {
            assert_eq!(PodStatus::from_str(status.as_str()).unwrap(), *status);
        }
        assert!(PodStatus::from_str("Crashed").is_err());
    }

    #[test]
    fn test_new_running_pod_defaults() {
        let pod = NewPod::running("frontend-abc12", Some(1), "frontend");
        assert_eq!(pod.namespace, "default");
        assert_eq!(pod.cpu_request, 100);
        assert_eq!(pod.memory_request, 128);
        assert!(pod.status.is_running());
    }

    #[test]
    fn test_healed_restarts_increments_by_one() {
        let mut pod = Pod::from_new(1, &NewPod::running("db-1", None, "database"), Utc::now());
        assert_eq!(pod.healed_restarts(), 1);
        pod.restarts = 4;
        assert_eq!(pod.healed_restarts(), 5);
    }

    #[test]
    fn test_pod_json_shape() {
        let pod = Pod::from_new(9, &NewPod::running("redis-x1", None, "redis"), Utc::now());
        let json = serde_json::to_value(&pod).unwrap();
        assert_eq!(json["nodeId"], serde_json::Value::Null);
        assert_eq!(json["status"], "Running");
        assert_eq!(json["memoryRequest"], 128);
    }
}
