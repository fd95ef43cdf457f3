use hello_mcp::{LoggingConfig, demo, init_logging};

/// Prints the demo and always exits successfully; arguments are ignored.
fn main() {
    // Tracing export needs an async runtime this binary does not start.
    let logging_config = LoggingConfig {
        enable_otel: false,
        default_level: "info",
        ..LoggingConfig::from_env()
    };
    let _guard = match init_logging(logging_config) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("Warning: logging disabled: {error:#}");
            None
        }
    };

    demo::run();
}
