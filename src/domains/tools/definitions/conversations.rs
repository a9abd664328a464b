//! Conversation tools.
//!
//! Canvas's internal messaging: list the inbox, read a conversation, and
//! send a new message.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;

use super::common::{outcome_result, split_csv};
use crate::domains::canvas::{CanvasClient, Method, Query};

// ============================================================================
// list_conversations
// ============================================================================

/// Parameters for the list conversations tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListConversationsParams {
    /// Mailbox scope.
    #[schemars(description = "Filter by scope (inbox, unread, starred, sent, archived, all)")]
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    "inbox".to_string()
}

/// List conversations for the current user.
pub struct ListConversationsTool;

impl ListConversationsTool {
    pub const NAME: &'static str = "list_conversations";

    pub const DESCRIPTION: &'static str =
        "List all conversations (messages) for the current user.";

    pub async fn execute(
        client: &CanvasClient,
        params: &ListConversationsParams,
    ) -> CallToolResult {
        info!("Listing conversations ({})", params.scope);

        let mut query = Query::new();
        query.push("scope", params.scope.as_str());

        outcome_result(
            client
                .execute(Method::Get, "conversations", Some(&query), None)
                .await,
        )
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListConversationsParams>(),
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
                let params: ListConversationsParams =
                    serde_json::from_value(Value::Object(args))
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
        let params: ListConversationsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_conversation
// ============================================================================

/// Parameters for the get conversation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetConversationParams {
    /// The conversation ID.
    #[schemars(description = "The conversation ID")]
    pub conversation_id: i64,
}

/// Get a specific conversation with all its messages.
pub struct GetConversationTool;

impl GetConversationTool {
    pub const NAME: &'static str = "get_conversation";

    pub const DESCRIPTION: &'static str =
        "Get details about a specific conversation including all messages.";

    pub async fn execute(
        client: &CanvasClient,
        params: &GetConversationParams,
    ) -> CallToolResult {
        info!("Getting conversation {}", params.conversation_id);

        let path = format!("conversations/{}", params.conversation_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetConversationParams>(),
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
                let params: GetConversationParams = serde_json::from_value(Value::Object(args))
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
        let params: GetConversationParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// create_conversation
// ============================================================================

/// Parameters for the create conversation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateConversationParams {
    /// Who receives the message, comma-separated user IDs.
    #[schemars(description = "Comma-separated list of recipient IDs (e.g., '123,456')")]
    pub recipients: String,

    /// Message subject.
    #[schemars(description = "Message subject")]
    pub subject: String,

    /// Message body.
    #[schemars(description = "Message body")]
    pub body: String,

    /// Optional course or group context.
    #[schemars(description = "Optional context (e.g., 'course_123')")]
    #[serde(default)]
    pub context_code: Option<String>,
}

/// Create a new conversation (send a message).
pub struct CreateConversationTool;

impl CreateConversationTool {
    pub const NAME: &'static str = "create_conversation";

    pub const DESCRIPTION: &'static str = "Send a message to other users in Canvas.";

    pub async fn execute(
        client: &CanvasClient,
        params: &CreateConversationParams,
    ) -> CallToolResult {
        info!("Creating conversation: {}", params.subject);

        let body = build_conversation_body(params);
        outcome_result(
            client
                .execute(Method::Post, "conversations", None, Some(&body))
                .await,
        )
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateConversationParams>(),
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
                let params: CreateConversationParams =
                    serde_json::from_value(Value::Object(args))
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
        let params: CreateConversationParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

/// Build the conversation body. Recipients are split from the
/// comma-separated input into the `recipients[]` list Canvas expects.
fn build_conversation_body(params: &CreateConversationParams) -> Value {
    let mut body = Map::new();
    body.insert("recipients[]".to_string(), json!(split_csv(&params.recipients)));
    body.insert("subject".to_string(), json!(params.subject));
    body.insert("body".to_string(), json!(params.body));
    if let Some(context_code) = &params.context_code {
        body.insert("context_code".to_string(), json!(context_code));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_conversations_default_scope() {
        let params: ListConversationsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.scope, "inbox");
    }

    #[test]
    fn test_conversation_body_splits_recipients() {
        let params = CreateConversationParams {
            recipients: "123,456".to_string(),
            subject: "Question".to_string(),
            body: "About the homework".to_string(),
            context_code: None,
        };
        let body = build_conversation_body(&params);
        assert_eq!(body["recipients[]"], json!(["123", "456"]));
        assert!(body.get("context_code").is_none());
    }

    #[test]
    fn test_conversation_body_with_context() {
        let params = CreateConversationParams {
            recipients: "123".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
            context_code: Some("course_9".to_string()),
        };
        let body = build_conversation_body(&params);
        assert_eq!(body["context_code"], "course_9");
    }
}
