use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 5;
const MAX_GRACEFUL_SHUTDOWN_SECS: u64 = 300;

/// Names of every tool the server can expose.
pub const KNOWN_TOOLS: &[&str] = &["say_hello", "system_info"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[value(alias = "stream-http", alias = "stream_http")]
    #[serde(alias = "stream-http", alias = "stream_http")]
    Http,
    Stdio,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Http => write!(f, "http"),
            TransportKind::Stdio => write!(f, "stdio"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub enabled_tools: Option<HashSet<String>>,
    pub transport: TransportKind,
    pub http_bind_address: SocketAddr,
    pub graceful_shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled_tools: None,
            transport: TransportKind::Stdio,
            http_bind_address: default_bind_address(),
            graceful_shutdown_timeout_secs: DEFAULT_GRACEFUL_SHUTDOWN_SECS,
        }
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8079))
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            enabled_tools: cli_enabled_tools,
            transport: cli_transport,
            http_bind: cli_http_bind,
            graceful_shutdown_timeout: cli_shutdown_timeout,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            enabled_tools: file_enabled_tools,
            transport: file_transport,
            http_bind: file_http_bind,
            graceful_shutdown_timeout_secs: file_shutdown_timeout,
        } = file_config;

        let enabled_tools = cli_enabled_tools
            .or(file_enabled_tools)
            .map(|tools| {
                tools
                    .into_iter()
                    .map(|tool| tool.trim().to_ascii_lowercase())
                    .filter(|tool| !tool.is_empty())
                    .collect::<HashSet<_>>()
            })
            .filter(|set| !set.is_empty());

        let transport = cli_transport
            .or(file_transport)
            .unwrap_or(TransportKind::Stdio);

        let http_bind_address = cli_http_bind
            .or(file_http_bind)
            .unwrap_or_else(default_bind_address);

        let graceful_shutdown_timeout_secs = cli_shutdown_timeout
            .or(file_shutdown_timeout)
            .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);

        Ok(Self {
            enabled_tools,
            transport,
            http_bind_address,
            graceful_shutdown_timeout_secs,
        })
    }

    /// Fail-fast checks run before the server starts.
    pub fn validate(&self) -> Result<()> {
        if let Some(tools) = &self.enabled_tools {
            let unknown = tools
                .iter()
                .filter(|tool| !KNOWN_TOOLS.contains(&tool.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            anyhow::ensure!(
                unknown.is_empty(),
                "unknown tool(s) in enabled_tools: {}; known tools: {}",
                unknown.join(", "),
                KNOWN_TOOLS.join(", ")
            );
        }

        anyhow::ensure!(
            self.graceful_shutdown_timeout_secs <= MAX_GRACEFUL_SHUTDOWN_SECS,
            "graceful shutdown timeout {}s exceeds maximum of {}s",
            self.graceful_shutdown_timeout_secs,
            MAX_GRACEFUL_SHUTDOWN_SECS
        );

        Ok(())
    }

    pub fn is_tool_enabled(&self, tool: &str) -> bool {
        match &self.enabled_tools {
            Some(set) => set.contains(&tool.to_ascii_lowercase()),
            None => true,
        }
    }

    pub fn enabled_tool_count(&self) -> usize {
        KNOWN_TOOLS
            .iter()
            .filter(|tool| self.is_tool_enabled(tool))
            .count()
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "hello-mcp", about = "Greeting MCP server", version)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "HELLO_MCP_ENABLED_TOOLS",
        value_name = "TOOL",
        value_delimiter = ',',
        help = "Restrict execution to the provided tool names"
    )]
    pub enabled_tools: Option<Vec<String>>,

    #[arg(
        long,
        env = "HELLO_MCP_TRANSPORT",
        value_enum,
        value_name = "TRANSPORT",
        help = "Transport to expose (http or stdio)"
    )]
    pub transport: Option<TransportKind>,

    #[arg(
        long,
        env = "HELLO_MCP_HTTP_BIND",
        value_name = "ADDR",
        help = "HTTP bind address when using http transport"
    )]
    pub http_bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "HELLO_MCP_GRACEFUL_SHUTDOWN_TIMEOUT",
        value_name = "SECS",
        help = "Seconds to wait for in-flight work during shutdown",
        value_parser = clap::value_parser!(u64)
    )]
    pub graceful_shutdown_timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    enabled_tools: Option<Vec<String>>,
    transport: Option<TransportKind>,
    http_bind: Option<SocketAddr>,
    graceful_shutdown_timeout_secs: Option<u64>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
