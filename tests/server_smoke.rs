use anyhow::Result;
use assert_matches::assert_matches;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use std::collections::HashSet;
use std::sync::Arc;

use hello_mcp::tools::SayHelloParams;
use hello_mcp::{HelloServer, ServerConfig};

fn server_with_tools(tools: &[&str]) -> HelloServer {
    let enabled: HashSet<String> = tools.iter().map(|tool| tool.to_string()).collect();
    let config = ServerConfig {
        enabled_tools: Some(enabled),
        ..ServerConfig::default()
    };
    HelloServer::new(Arc::new(config))
}

#[tokio::test(flavor = "current_thread")]
async fn say_hello_tool_returns_greeting() -> Result<()> {
    let server = HelloServer::new(Arc::new(ServerConfig::default()));

    let response = server
        .say_hello(Parameters(SayHelloParams {
            name: "World".to_string(),
        }))
        .await?
        .0;
    assert_eq!(response.greeting, "Hello, World!");

    let empty = server
        .say_hello(Parameters(SayHelloParams {
            name: String::new(),
        }))
        .await?
        .0;
    assert_eq!(empty.greeting, "Hello, !");

    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn system_info_tool_reports_process() -> Result<()> {
    let server = HelloServer::new(Arc::new(ServerConfig::default()));
    let info = server.system_info().await?.0;
    assert_eq!(info.operating_system, std::env::consts::OS);
    assert!(!info.user.is_empty());
    assert!(info.runtime_version.contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn disabled_tools_return_invalid_request() -> Result<()> {
    let server = server_with_tools(&["system_info"]);

    server.system_info().await?;

    let result = server
        .say_hello(Parameters(SayHelloParams {
            name: "World".to_string(),
        }))
        .await
        .map(|json| json.0);

    assert_matches!(
        result,
        Err(ref error) if error.code == ErrorCode::INVALID_REQUEST
            && error.message == "tool 'say_hello' is disabled by server configuration"
    );

    Ok(())
}
