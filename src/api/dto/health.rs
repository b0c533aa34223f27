//! Response body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentState {
    Ok,
    Error,
}

/// Overall status, crate version and one entry per probed component.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: ComponentHealth,
    pub click_queue: ComponentHealth,
}

impl HealthChecks {
    pub fn status(&self) -> ServiceStatus {
        if self.storage.is_ok() && self.click_queue.is_ok() {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentState,
    pub message: String,
}

impl ComponentHealth {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: ComponentState::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ComponentState::Error,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ComponentState::Ok
    }
}
