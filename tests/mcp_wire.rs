use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::model::{CallToolRequestParam, CallToolResult, JsonObject};
use rmcp::service::{RoleClient, RunningService};
use serde_json::json;
use std::sync::Arc;

use hello_mcp::{HelloServer, ServerConfig};

async fn connect() -> Result<RunningService<RoleClient, ()>> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = HelloServer::new(Arc::new(ServerConfig::default()));
    tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        anyhow::Ok(())
    });

    Ok(().serve(client_transport).await?)
}

async fn call_say_hello(
    client: &RunningService<RoleClient, ()>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult> {
    Ok(client
        .call_tool(CallToolRequestParam {
            name: "say_hello".into(),
            arguments,
        })
        .await?)
}

fn greeting(result: &CallToolResult) -> Option<&str> {
    result.structured_content.as_ref()?.get("greeting")?.as_str()
}

#[tokio::test]
async fn lists_both_tools_over_the_wire() -> Result<()> {
    let client = connect().await?;

    let mut names: Vec<String> = client
        .list_all_tools()
        .await?
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["say_hello", "system_info"]);

    client.cancel().await?;
    Ok(())
}

#[tokio::test]
async fn say_hello_over_the_wire() -> Result<()> {
    let client = connect().await?;

    let world = json!({ "name": "World" }).as_object().cloned();
    let result = call_say_hello(&client, world).await?;
    assert_ne!(result.is_error, Some(true));
    assert_eq!(greeting(&result), Some("Hello, World!"));

    let result = call_say_hello(&client, Some(JsonObject::new())).await?;
    assert_eq!(greeting(&result), Some("Hello, !"));

    let result = call_say_hello(&client, None).await?;
    assert_eq!(greeting(&result), Some("Hello, !"));

    client.cancel().await?;
    Ok(())
}
