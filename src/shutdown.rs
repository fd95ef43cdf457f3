//! Graceful shutdown coordination for the HTTP transport.
//!
//! The coordinator waits for SIGINT/SIGTERM, cancels a shared
//! [`CancellationToken`] so the server stops accepting connections, and
//! bounds the drain of in-flight requests by `total_timeout`.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// Maximum time allowed for in-flight work after the signal
    pub total_timeout: Duration,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            total_timeout: Duration::from_secs(5),
        }
    }
}

impl ShutdownConfig {
    pub fn with_total_timeout(mut self, timeout_secs: u64) -> Self {
        self.total_timeout = Duration::from_secs(timeout_secs);
        self
    }
}

/// Outcome of draining the server after shutdown began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    Completed,
    TimedOut,
}

pub struct ShutdownCoordinator {
    config: ShutdownConfig,
    token: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new(config: ShutdownConfig) -> Self {
        Self {
            config,
            token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Starts shutdown without waiting for a signal.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Resolves on SIGINT, SIGTERM, or a prior [`ShutdownCoordinator::trigger`],
    /// then cancels the token.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!(%error, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(error) => {
                    warn!(%error, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("received SIGINT (Ctrl+C), initiating graceful shutdown");
            },
            _ = terminate => {
                info!("received SIGTERM, initiating graceful shutdown");
            },
            _ = self.token.cancelled() => {
                info!("shutdown triggered programmatically");
            },
        }

        self.token.cancel();
    }

    /// Waits for `drain` to finish, giving up after the configured timeout.
    pub async fn drain<F>(&self, drain: F) -> DrainOutcome
    where
        F: Future<Output = ()>,
    {
        match timeout(self.config.total_timeout, drain).await {
            Ok(()) => DrainOutcome::Completed,
            Err(_) => {
                warn!(
                    timeout_secs = self.config.total_timeout.as_secs(),
                    "graceful shutdown exceeded timeout"
                );
                DrainOutcome::TimedOut
            }
        }
    }
}
