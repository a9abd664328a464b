//! Server info tool.
//!
//! Reports the server's own identity and whether Canvas credentials are
//! configured. The only tool that never touches the Canvas API.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::{Value, json};

use super::common::{NoParams, json_result};
use crate::domains::canvas::CanvasClient;

/// Report server name, version, and configuration status.
pub struct ServerInfoTool;

impl ServerInfoTool {
    pub const NAME: &'static str = "get_server_info";

    pub const DESCRIPTION: &'static str =
        "Get information about this Canvas MCP server including version and configuration.";

    pub fn execute(client: &CanvasClient) -> CallToolResult {
        let credentials = client.credentials();
        json_result(&json!({
            "server_name": "Canvas LMS MCP Server",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Model Context Protocol server for Canvas LMS (Student perspective)",
            "canvas_api_url": credentials.base_url(),
            "api_token_configured": credentials.has_token(),
        }))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<CanvasClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let client = client.clone();
            async move { Ok::<_, McpError>(Self::execute(&client)) }.boxed()
        })
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        _arguments: Value,
        client: Arc<CanvasClient>,
    ) -> Result<Value, String> {
        Ok(super::common::http_response(Self::execute(&client)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::canvas::Credentials;
    use rmcp::model::RawContent;

    #[test]
    fn test_server_info_reports_token_state() {
        let client = CanvasClient::new(Credentials::new("https://canvas.test/api/v1", "tok"));
        let result = ServerInfoTool::execute(&client);
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("\"api_token_configured\": true"));
        assert!(text.contains("https://canvas.test/api/v1"));
        // The token itself never appears in the output
        assert!(!text.contains("tok\""));
    }
}
