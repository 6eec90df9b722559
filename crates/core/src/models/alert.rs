use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 告警记录，对引擎而言只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
}

text_enum!(AlertSeverity {
    Critical => "critical",
    Warning => "warning",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
}

text_enum!(AlertStatus {
    Firing => "firing",
    Resolved => "resolved",
});

#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn from_new(id: i64, alert: &NewAlert) -> Self {
        Self {
            id,
            severity: alert.severity,
            title: alert.title.clone(),
            description: alert.description.clone(),
            status: alert.status,
            created_at: alert.created_at,
        }
    }

    pub fn is_firing(&self) -> bool {
        matches!(self.status, AlertStatus::Firing)
    }
}
