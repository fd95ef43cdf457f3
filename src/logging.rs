//! Structured logging setup.
//!
//! Logs go to stderr by default: stdout belongs to the demo printer and to
//! the stdio MCP transport. JSON output is selected automatically in
//! production environments, and spans are exported over OTLP when an
//! endpoint is configured.

use anyhow::{Context, Result};
use opentelemetry::{
    KeyValue,
    trace::TraceError,
};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const SERVICE_NAME: &str = "hello-mcp";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub output: LogOutput,
    /// Directory for log files (when output is "file")
    pub log_dir: PathBuf,
    pub log_file_prefix: String,
    pub service_name: String,
    pub service_version: String,
    /// e.g. "development", "production"
    pub environment: String,
    /// Filter directive used when `RUST_LOG` is unset
    pub default_level: &'static str,
    pub enable_otel: bool,
    pub otlp_endpoint: Option<String>,
    /// OpenTelemetry trace sampling rate (0.0 to 1.0)
    pub otel_sampling_rate: f64,
    pub otlp_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Daily-rotated file under `log_dir`
    File,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let is_production = is_production(&environment);

        Self {
            format: if is_production {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            output: LogOutput::Stderr,
            log_dir: PathBuf::from("logs"),
            log_file_prefix: SERVICE_NAME.to_string(),
            service_name: SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment,
            default_level: if is_production { "info" } else { "debug" },
            enable_otel: false,
            otlp_endpoint: None,
            otel_sampling_rate: if is_production { 0.1 } else { 1.0 },
            otlp_timeout_secs: 10,
        }
    }
}

fn is_production(environment: &str) -> bool {
    environment == "production" || environment == "prod"
}

impl LoggingConfig {
    /// Create a new logging configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(format) = env::var("LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => config.format,
            };
        }

        if let Ok(output) = env::var("LOG_OUTPUT") {
            config.output = match output.to_lowercase().as_str() {
                "stdout" => LogOutput::Stdout,
                "stderr" => LogOutput::Stderr,
                "file" => LogOutput::File,
                _ => config.output,
            };
        }

        if let Ok(log_dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(log_dir);
        }

        if let Ok(otel_endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
            config.enable_otel = true;
            config.otlp_endpoint = Some(otel_endpoint);
        } else if env::var("ENABLE_OTEL").is_ok() {
            config.enable_otel = true;
        }

        if let Ok(rate_str) = env::var("OTEL_SAMPLING_RATE")
            && let Ok(rate) = rate_str.parse::<f64>()
        {
            config.otel_sampling_rate = rate.clamp(0.0, 1.0);
        }

        if let Ok(timeout_str) = env::var("OTEL_EXPORTER_OTLP_TIMEOUT")
            && let Ok(timeout) = timeout_str.parse::<u64>()
        {
            config.otlp_timeout_secs = timeout;
        }

        config
    }

    fn resource(&self) -> Resource {
        Resource::new(vec![
            KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                self.service_name.clone(),
            ),
            KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                self.service_version.clone(),
            ),
            KeyValue::new("environment", self.environment.clone()),
            KeyValue::new("service.namespace", "mcp"),
        ])
    }

    fn sampler(&self) -> Sampler {
        if self.otel_sampling_rate >= 1.0 {
            Sampler::AlwaysOn
        } else if self.otel_sampling_rate <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
                self.otel_sampling_rate,
            )))
        }
    }
}

/// Initialize structured logging with the given configuration.
///
/// The returned guard must be held for the lifetime of the application so
/// buffered log lines are flushed on exit.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},hyper=info,tower=info,rmcp=info",
            config.default_level
        ))
    });

    let (writer, guard) = match config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
        LogOutput::File => {
            std::fs::create_dir_all(&config.log_dir).context("Failed to create log directory")?;
            let file_appender =
                tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
            tracing_appender::non_blocking(file_appender)
        }
    };

    let otel_layer = if config.enable_otel && config.otlp_endpoint.is_some() {
        match init_tracer(&config) {
            Ok(tracer) => Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to initialize OpenTelemetry exporter: {}. Continuing without distributed tracing.",
                    e
                );
                None
            }
        }
    } else {
        if config.enable_otel {
            eprintln!(
                "Warning: OpenTelemetry enabled but no OTLP endpoint configured. \
                 Set OTEL_EXPORTER_OTLP_ENDPOINT to enable distributed tracing."
            );
        }
        None
    };

    let registry = tracing_subscriber::registry();

    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_filter(env_filter);

            registry
                .with(otel_layer)
                .with(fmt_layer)
                .try_init()
                .context("failed to install tracing subscriber")?;
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .with_file(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(ansi_enabled(config.output))
                .with_filter(env_filter);

            registry
                .with(otel_layer)
                .with(fmt_layer)
                .try_init()
                .context("failed to install tracing subscriber")?;
        }
    }

    tracing::debug!(
        service = %config.service_name,
        version = %config.service_version,
        environment = %config.environment,
        format = ?config.format,
        output = ?config.output,
        "logging initialized"
    );

    Ok(Some(guard))
}

/// Colors only when the destination is an interactive terminal.
fn ansi_enabled(output: LogOutput) -> bool {
    match output {
        LogOutput::Stdout => io::stdout().is_terminal(),
        LogOutput::Stderr => io::stderr().is_terminal(),
        LogOutput::File => false,
    }
}

/// Installs the OTLP batch pipeline as the global tracer provider and
/// returns its tracer.
fn init_tracer(config: &LoggingConfig) -> Result<Tracer, TraceError> {
    let endpoint = config
        .otlp_endpoint
        .as_ref()
        .ok_or_else(|| TraceError::Other("No OTLP endpoint configured".into()))?;

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(config.otlp_timeout_secs));

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(config.sampler())
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(config.resource()),
        )
        .install_batch(opentelemetry_sdk::runtime::Tokio)
}

/// Flush and shut down the global OpenTelemetry tracer provider.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Create a span for MCP tool execution.
pub fn mcp_tool_span(tool_name: &str) -> tracing::Span {
    tracing::info_span!(
        "mcp_tool",
        mcp.tool = tool_name,
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.service_name, "hello-mcp");
        assert_eq!(config.output, LogOutput::Stderr);
        assert!(config.otel_sampling_rate >= 0.0 && config.otel_sampling_rate <= 1.0);
    }

    #[test]
    fn file_output_never_uses_ansi() {
        assert!(!ansi_enabled(LogOutput::File));
    }

    #[test]
    fn tracer_requires_endpoint() {
        let config = LoggingConfig {
            enable_otel: true,
            otlp_endpoint: None,
            ..LoggingConfig::default()
        };
        let result: Result<Tracer, TraceError> = init_tracer(&config);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn default_level_follows_environment() {
        unsafe {
            env::set_var("ENVIRONMENT", "production");
        }
        assert_eq!(LoggingConfig::default().default_level, "info");

        unsafe {
            env::set_var("ENVIRONMENT", "development");
        }
        assert_eq!(LoggingConfig::default().default_level, "debug");

        unsafe {
            env::remove_var("ENVIRONMENT");
        }
    }

    #[test]
    #[serial]
    fn logging_config_from_env() {
        unsafe {
            env::set_var("LOG_FORMAT", "json");
            env::set_var("LOG_OUTPUT", "file");
            env::set_var("OTEL_SAMPLING_RATE", "7.5");
        }

        let config = LoggingConfig::from_env();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output, LogOutput::File);
        assert_eq!(config.otel_sampling_rate, 1.0);

        unsafe {
            env::remove_var("LOG_FORMAT");
            env::remove_var("LOG_OUTPUT");
            env::remove_var("OTEL_SAMPLING_RATE");
        }
    }

    #[test]
    #[serial]
    fn unknown_values_keep_defaults() {
        unsafe {
            env::set_var("LOG_FORMAT", "xml");
            env::set_var("LOG_OUTPUT", "printer");
        }

        let defaults = LoggingConfig::default();
        let config = LoggingConfig::from_env();
        assert_eq!(config.format, defaults.format);
        assert_eq!(config.output, LogOutput::Stderr);

        unsafe {
            env::remove_var("LOG_FORMAT");
            env::remove_var("LOG_OUTPUT");
        }
    }
}
