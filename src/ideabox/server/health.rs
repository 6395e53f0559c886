//! Health reporting: the plain liveness probe plus a detailed report on the
//! backing document and process uptime.

use crate::model::iso8601;
use crate::store::BackendStatus;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub timestamp: String,
}

impl Liveness {
    pub fn now() -> Self {
        Self {
            status: "OK",
            timestamp: iso8601::format(&Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
    Degraded,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFileCheck {
    pub status: CheckStatus,
    pub message: String,
    #[serde(flatten)]
    pub backend: BackendStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeCheck {
    pub status: CheckStatus,
    pub message: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub data_file: DataFileCheck,
    pub uptime: UptimeCheck,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: CheckStatus,
    pub checks: HealthChecks,
}

impl HealthReport {
    pub fn build(backend: BackendStatus, uptime: Duration) -> Self {
        let data_file = if backend.accessible {
            DataFileCheck {
                status: CheckStatus::Healthy,
                message: "Data file accessible".to_string(),
                backend,
            }
        } else {
            DataFileCheck {
                status: CheckStatus::Unhealthy,
                message: "Data file not accessible".to_string(),
                backend,
            }
        };

        let secs = uptime.as_secs();
        let uptime = UptimeCheck {
            status: CheckStatus::Healthy,
            message: format!(
                "Uptime: {}h {}m {}s",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60
            ),
            uptime_seconds: secs,
        };

        let status = if data_file.status == CheckStatus::Healthy && uptime.status == CheckStatus::Healthy {
            CheckStatus::Healthy
        } else {
            CheckStatus::Degraded
        };

        Self {
            status,
            checks: HealthChecks {
                data_file,
                uptime,
                timestamp: iso8601::format(&Utc::now()),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}
