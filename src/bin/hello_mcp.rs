use clap::Parser;
use hello_mcp::{CliArgs, LoggingConfig, ServerConfig, init_logging, run_server, shutdown_telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(logging_config)?;

    let cli = CliArgs::parse();
    let config = ServerConfig::from_args(cli)?;

    // Fail fast on bad configuration
    config.validate()?;

    let result = run_server(config).await;

    // Ensure traces are flushed before exit
    shutdown_telemetry();

    result
}
