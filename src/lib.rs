pub mod config;
pub mod demo;
pub mod error;
pub mod greeting;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod server;
pub mod shutdown;
pub mod tools;

pub use config::{CliArgs, ServerConfig, TransportKind};
pub use error::{ErrorCategory, ToolDisabledError, to_mcp_error};
pub use greeting::{HelloWorldBean, HelloWorldRemote, say_hello};
pub use logging::{LoggingConfig, init_logging, shutdown_telemetry};
pub use server::HelloServer;
pub use shutdown::{ShutdownConfig, ShutdownCoordinator};

use anyhow::Result;
use axum::Router;
use health::HealthChecker;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use shutdown::DrainOutcome;
use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;

pub const HTTP_SERVICE_PATH: &str = "/mcp";

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);

    tracing::info!(
        transport = %config.transport,
        enabled_tools = config.enabled_tool_count(),
        "starting hello MCP server",
    );

    match config.transport {
        TransportKind::Stdio => HelloServer::new(config).run_stdio().await,
        TransportKind::Http => run_stream_http_transport(config).await,
    }
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    (axum::http::StatusCode::OK, metrics::METRICS.encode())
}

/// Routes served by the HTTP transport: the MCP endpoint plus probes.
pub fn http_router(config: Arc<ServerConfig>) -> Router {
    let service_config = config.clone();
    let service = StreamableHttpService::new(
        move || Ok(HelloServer::new(service_config.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let health_checker = Arc::new(HealthChecker::new(config));

    Router::new()
        .nest_service(HTTP_SERVICE_PATH, service)
        .route("/health", axum::routing::get(health::liveness_handler))
        .route("/ready", axum::routing::get(health::readiness_handler))
        .route("/metrics", axum::routing::get(metrics_handler))
        .with_state(health_checker)
}

async fn run_stream_http_transport(config: Arc<ServerConfig>) -> Result<()> {
    let shutdown_config =
        ShutdownConfig::default().with_total_timeout(config.graceful_shutdown_timeout_secs);
    let coordinator = Arc::new(ShutdownCoordinator::new(shutdown_config));

    let router = http_router(config.clone());
    let listener = TcpListener::bind(config.http_bind_address).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(transport = "http", bind = %actual_addr, path = HTTP_SERVICE_PATH, "listening");

    let signal_coordinator = coordinator.clone();
    tokio::spawn(async move {
        signal_coordinator.wait_for_signal().await;
    });

    let shutdown_token = coordinator.token();
    let graceful_token = shutdown_token.clone();
    let server_future = axum::serve(listener, router)
        .with_graceful_shutdown(async move { graceful_token.cancelled_owned().await })
        .into_future();
    tokio::pin!(server_future);

    tokio::select! {
        result = &mut server_future => return result.map_err(anyhow::Error::from),
        _ = shutdown_token.cancelled() => {}
    }

    tracing::info!("shutdown requested, draining in-flight requests");
    let mut server_result = Ok(());
    let outcome = coordinator
        .drain(async {
            server_result = (&mut server_future).await;
        })
        .await;

    match outcome {
        DrainOutcome::Completed => tracing::info!("server stopped"),
        DrainOutcome::TimedOut => tracing::warn!("server stopped with requests still in flight"),
    }

    server_result.map_err(anyhow::Error::from)
}
