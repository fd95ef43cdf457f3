use crate::config::ServerConfig;
use crate::error::{ToolDisabledError, classify, to_mcp_error};
use crate::greeting::{HelloWorldBean, HelloWorldRemote};
use crate::logging::mcp_tool_span;
use crate::metrics::RequestMetrics;
use crate::model::{SayHelloResponse, SystemInfo};
use crate::tools;
use anyhow::Result;
use rmcp::{
    ErrorData as McpError, Json, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;

const INSTRUCTIONS: &str = "\
Greeting MCP server.

TOOLS:
- say_hello {name}: returns {greeting: \"Hello, <name>!\"}. Any name is accepted, including \"\".
- system_info: runtime version, operating system and current user of the server process.";

#[derive(Clone)]
pub struct HelloServer {
    config: Arc<ServerConfig>,
    greeter: Arc<dyn HelloWorldRemote>,
    tool_router: ToolRouter<HelloServer>,
}

impl HelloServer {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self::with_greeter(config, Arc::new(HelloWorldBean::new()))
    }

    pub fn with_greeter(config: Arc<ServerConfig>, greeter: Arc<dyn HelloWorldRemote>) -> Self {
        Self {
            config,
            greeter,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn run_stdio(self) -> Result<()> {
        let service = self
            .serve(stdio())
            .await
            .inspect_err(|error| tracing::error!("serving error: {:?}", error))?;
        service.waiting().await?;
        Ok(())
    }

    fn ensure_tool_enabled(&self, tool: &str) -> Result<()> {
        if self.config.is_tool_enabled(tool) {
            Ok(())
        } else {
            Err(ToolDisabledError::new(tool).into())
        }
    }

    /// Runs a tool body behind the enable gate, with a span and metrics.
    fn invoke<T>(&self, tool: &'static str, body: impl FnOnce() -> T) -> Result<T, McpError> {
        let _span = mcp_tool_span(tool).entered();
        let metrics = RequestMetrics::new(tool);
        tracing::info!(tool = tool, "tool invocation requested");

        if let Err(error) = self.ensure_tool_enabled(tool) {
            let category = classify(&error);
            tracing::warn!(tool = tool, %category, "tool invocation rejected");
            metrics.finish(category.label());
            return Err(to_mcp_error(error));
        }

        let output = body();
        metrics.finish("success");
        Ok(output)
    }
}

#[tool_router]
impl HelloServer {
    #[tool(
        name = "say_hello",
        description = "Greet someone by name. Returns \"Hello, <name>!\""
    )]
    pub async fn say_hello(
        &self,
        Parameters(params): Parameters<tools::SayHelloParams>,
    ) -> Result<Json<SayHelloResponse>, McpError> {
        self.invoke("say_hello", || {
            tools::say_hello(self.greeter.as_ref(), params)
        })
        .map(Json)
    }

    #[tool(
        name = "system_info",
        description = "Report runtime version, operating system and user of the server process"
    )]
    pub async fn system_info(&self) -> Result<Json<SystemInfo>, McpError> {
        self.invoke("system_info", tools::system_info).map(Json)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for HelloServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..ServerInfo::default()
        }
    }
}
