use crate::config::ServerConfig;
use crate::greeting::{HelloWorldBean, HelloWorldRemote};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

const SELF_TEST_NAME: &str = "health";
const SELF_TEST_EXPECTED: &str = "Hello, health!";

/// Health status for a component or the overall system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Combines two health statuses, returning the worse of the two
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (HealthStatus::Healthy, HealthStatus::Healthy) => HealthStatus::Healthy,
            _ => HealthStatus::Unhealthy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub component: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ComponentHealth {
    pub fn healthy_with_details(component: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            error: None,
            timestamp: now(),
            details: Some(details),
        }
    }

    pub fn unhealthy(component: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
            timestamp: now(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: i64,
    pub version: String,
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status = self.status.status_code();
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub status: HealthStatus,
    pub timestamp: i64,
    /// Components that are not ready
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub not_ready: Vec<String>,
    pub components: HashMap<String, ComponentHealth>,
}

impl IntoResponse for ReadinessResponse {
    fn into_response(self) -> Response {
        let status = if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Clone)]
pub struct HealthChecker {
    config: Arc<ServerConfig>,
    greeter: Arc<dyn HelloWorldRemote>,
}

impl HealthChecker {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self::with_greeter(config, Arc::new(HelloWorldBean::new()))
    }

    pub fn with_greeter(config: Arc<ServerConfig>, greeter: Arc<dyn HelloWorldRemote>) -> Self {
        Self { config, greeter }
    }

    /// Liveness: healthy whenever the process can answer at all.
    pub fn liveness(&self) -> HealthResponse {
        HealthResponse {
            status: HealthStatus::Healthy,
            timestamp: now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn readiness(&self) -> ReadinessResponse {
        let components = self.check_all_components();
        let mut overall = HealthStatus::Healthy;
        let mut not_ready = Vec::new();

        for (name, health) in &components {
            overall = overall.combine(health.status);
            if health.status == HealthStatus::Unhealthy {
                not_ready.push(name.clone());
            }
        }
        not_ready.sort();

        ReadinessResponse {
            ready: overall != HealthStatus::Unhealthy,
            status: overall,
            timestamp: now(),
            not_ready,
            components,
        }
    }

    fn check_all_components(&self) -> HashMap<String, ComponentHealth> {
        let mut components = HashMap::new();
        components.insert("greeter".to_string(), self.check_greeter());
        components.insert("tools".to_string(), self.check_tools());
        components
    }

    fn check_greeter(&self) -> ComponentHealth {
        let greeting = self.greeter.say_hello(SELF_TEST_NAME);
        if greeting == SELF_TEST_EXPECTED {
            ComponentHealth::healthy_with_details(
                "greeter",
                serde_json::json!({ "self_test": greeting }),
            )
        } else {
            ComponentHealth::unhealthy(
                "greeter",
                format!("self-test returned {greeting:?}, expected {SELF_TEST_EXPECTED:?}"),
            )
        }
    }

    fn check_tools(&self) -> ComponentHealth {
        let enabled = self.config.enabled_tool_count();
        if enabled == 0 {
            ComponentHealth::unhealthy("tools", "no tools are enabled")
        } else {
            ComponentHealth::healthy_with_details(
                "tools",
                serde_json::json!({ "enabled": enabled }),
            )
        }
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

pub async fn liveness_handler(State(checker): State<Arc<HealthChecker>>) -> impl IntoResponse {
    checker.liveness()
}

pub async fn readiness_handler(State(checker): State<Arc<HealthChecker>>) -> impl IntoResponse {
    checker.readiness()
}
