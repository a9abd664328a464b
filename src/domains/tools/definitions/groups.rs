//! Group tools.
//!
//! The companion `list_user_groups` tool lives with the other
//! `users/self` endpoints in `users.rs`.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::common::{outcome_result, split_csv};
use crate::domains::canvas::{CanvasClient, Method, Query};

/// Parameters for the get group tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGroupParams {
    /// The group ID.
    #[schemars(description = "The group ID")]
    pub group_id: i64,

    /// Extra data to include, comma-separated.
    #[schemars(description = "Additional information to include (e.g., 'users,tabs')")]
    #[serde(default)]
    pub include: Option<String>,
}

/// Get details for a specific group.
pub struct GetGroupTool;

impl GetGroupTool {
    pub const NAME: &'static str = "get_group";

    pub const DESCRIPTION: &'static str =
        "Get details about a specific group including members and description.";

    pub async fn execute(client: &CanvasClient, params: &GetGroupParams) -> CallToolResult {
        info!("Getting group {}", params.group_id);

        let mut query = Query::new();
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!("groups/{}", params.group_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetGroupParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: GetGroupParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: Arc<CanvasClient>,
    ) -> Result<Value, String> {
        let params: GetGroupParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}
