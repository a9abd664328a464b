//! Discussion tools.
//!
//! Listing discussion topics, reading a topic with its full reply tree,
//! and posting entries or replies.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::common::outcome_result;
use crate::domains::canvas::{CanvasClient, Method, Query};

// ============================================================================
// list_discussions
// ============================================================================

/// Parameters for the list discussions tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListDiscussionsParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Result ordering.
    #[schemars(description = "How to order discussions (position, recent_activity, title)")]
    #[serde(default = "default_order_by")]
    pub order_by: String,

    /// Optional scope filter.
    #[schemars(description = "Filter scope (e.g., 'locked', 'unlocked', 'pinned', 'unpinned')")]
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_order_by() -> String {
    "position".to_string()
}

/// List discussion topics in a course.
pub struct ListDiscussionsTool;

impl ListDiscussionsTool {
    pub const NAME: &'static str = "list_discussions";

    pub const DESCRIPTION: &'static str =
        "List all discussion topics in a course including titles, authors, and reply counts.";

    pub async fn execute(client: &CanvasClient, params: &ListDiscussionsParams) -> CallToolResult {
        info!("Listing discussions for course {}", params.course_id);

        let mut query = Query::new();
        query.push("order_by", params.order_by.as_str());
        if let Some(scope) = &params.scope {
            query.push("scope", scope.as_str());
        }

        let path = format!("courses/{}/discussion_topics", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListDiscussionsParams>(),
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
                let params: ListDiscussionsParams = serde_json::from_value(Value::Object(args))
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
        let params: ListDiscussionsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_discussion
// ============================================================================

/// Parameters for the get discussion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDiscussionParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The discussion topic ID.
    #[schemars(description = "The discussion topic ID")]
    pub topic_id: i64,
}

/// Get a discussion topic with its full view.
pub struct GetDiscussionTool;

impl GetDiscussionTool {
    pub const NAME: &'static str = "get_discussion";

    pub const DESCRIPTION: &'static str =
        "Get detailed information about a discussion topic including the full message and all replies.";

    pub async fn execute(client: &CanvasClient, params: &GetDiscussionParams) -> CallToolResult {
        info!(
            "Getting discussion {} in course {}",
            params.topic_id, params.course_id
        );

        let path = format!(
            "courses/{}/discussion_topics/{}/view",
            params.course_id, params.topic_id
        );
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetDiscussionParams>(),
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
                let params: GetDiscussionParams = serde_json::from_value(Value::Object(args))
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
        let params: GetDiscussionParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// create_discussion_entry
// ============================================================================

/// Parameters for the discussion entry tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDiscussionEntryParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The discussion topic ID.
    #[schemars(description = "The discussion topic ID")]
    pub topic_id: i64,

    /// The message to post.
    #[schemars(description = "The message body (HTML or plain text)")]
    pub message: String,

    /// Reply target; top-level entry when absent.
    #[schemars(description = "Optional parent entry ID for replies")]
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Post an entry (or a reply) to a discussion topic.
pub struct CreateDiscussionEntryTool;

impl CreateDiscussionEntryTool {
    pub const NAME: &'static str = "create_discussion_entry";

    pub const DESCRIPTION: &'static str =
        "Post a reply to a discussion topic. Use this to participate in class discussions.";

    pub async fn execute(
        client: &CanvasClient,
        params: &CreateDiscussionEntryParams,
    ) -> CallToolResult {
        info!(
            "Posting to discussion {} in course {}",
            params.topic_id, params.course_id
        );

        let body = json!({ "message": params.message });
        let path = entry_path(params);
        outcome_result(client.execute(Method::Post, &path, None, Some(&body)).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateDiscussionEntryParams>(),
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
                let params: CreateDiscussionEntryParams =
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
        let params: CreateDiscussionEntryParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

/// Top-level entries and replies use different endpoints.
fn entry_path(params: &CreateDiscussionEntryParams) -> String {
    match params.parent_id {
        Some(parent_id) => format!(
            "courses/{}/discussion_topics/{}/entries/{}/replies",
            params.course_id, params.topic_id, parent_id
        ),
        None => format!(
            "courses/{}/discussion_topics/{}/entries",
            params.course_id, params.topic_id
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_discussions_default_order() {
        let params: ListDiscussionsParams =
            serde_json::from_str(r#"{"course_id": 1}"#).unwrap();
        assert_eq!(params.order_by, "position");
        assert!(params.scope.is_none());
    }

    #[test]
    fn test_entry_path_top_level() {
        let params = CreateDiscussionEntryParams {
            course_id: 1,
            topic_id: 2,
            message: "hi".to_string(),
            parent_id: None,
        };
        assert_eq!(entry_path(&params), "courses/1/discussion_topics/2/entries");
    }

    #[test]
    fn test_entry_path_reply() {
        let params = CreateDiscussionEntryParams {
            course_id: 1,
            topic_id: 2,
            message: "hi".to_string(),
            parent_id: Some(5),
        };
        assert_eq!(
            entry_path(&params),
            "courses/1/discussion_topics/2/entries/5/replies"
        );
    }
}
