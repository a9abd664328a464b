//! Assignment tools.
//!
//! Listing assignments, inspecting one, turning in work, and checking a
//! submission.

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
// list_assignments
// ============================================================================

/// Parameters for the list assignments tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAssignmentsParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Extra data to include, comma-separated.
    #[schemars(
        description = "Additional information to include (e.g., 'submission,rubric,score_statistics')"
    )]
    #[serde(default)]
    pub include: Option<String>,

    /// Result ordering.
    #[schemars(description = "How to order assignments (due_at, name, position)")]
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

fn default_order_by() -> String {
    "due_at".to_string()
}

/// List all assignments in a course.
pub struct ListAssignmentsTool;

impl ListAssignmentsTool {
    pub const NAME: &'static str = "list_assignments";

    pub const DESCRIPTION: &'static str =
        "List all assignments in a course with their due dates, points, and submission status.";

    pub async fn execute(client: &CanvasClient, params: &ListAssignmentsParams) -> CallToolResult {
        info!("Listing assignments for course {}", params.course_id);

        let mut query = Query::new();
        query.push("order_by", params.order_by.as_str());
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!("courses/{}/assignments", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListAssignmentsParams>(),
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
                let params: ListAssignmentsParams = serde_json::from_value(Value::Object(args))
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
        let params: ListAssignmentsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_assignment
// ============================================================================

/// Parameters for the get assignment tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAssignmentParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The assignment ID.
    #[schemars(description = "The assignment ID")]
    pub assignment_id: i64,

    /// Extra data to include, comma-separated.
    #[schemars(description = "Additional information to include (e.g., 'submission,rubric')")]
    #[serde(default)]
    pub include: Option<String>,
}

/// Get details for a specific assignment.
pub struct GetAssignmentTool;

impl GetAssignmentTool {
    pub const NAME: &'static str = "get_assignment";

    pub const DESCRIPTION: &'static str = "Get detailed information about a specific assignment including description, due date, and submission requirements.";

    pub async fn execute(client: &CanvasClient, params: &GetAssignmentParams) -> CallToolResult {
        info!(
            "Getting assignment {} in course {}",
            params.assignment_id, params.course_id
        );

        let mut query = Query::new();
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!(
            "courses/{}/assignments/{}",
            params.course_id, params.assignment_id
        );
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetAssignmentParams>(),
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
                let params: GetAssignmentParams = serde_json::from_value(Value::Object(args))
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
        let params: GetAssignmentParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// submit_assignment
// ============================================================================

/// Parameters for the submit assignment tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubmitAssignmentParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The assignment ID.
    #[schemars(description = "The assignment ID")]
    pub assignment_id: i64,

    /// How the work is submitted.
    #[schemars(
        description = "Type of submission (online_text_entry, online_url, online_upload)"
    )]
    pub submission_type: String,

    /// Text body for text submissions.
    #[schemars(description = "Text body for text submissions")]
    #[serde(default)]
    pub body: Option<String>,

    /// URL for URL submissions.
    #[schemars(description = "URL for URL submissions")]
    #[serde(default)]
    pub url: Option<String>,
}

/// Turn in an assignment.
pub struct SubmitAssignmentTool;

impl SubmitAssignmentTool {
    pub const NAME: &'static str = "submit_assignment";

    pub const DESCRIPTION: &'static str =
        "Submit an assignment with text content or a URL. Use this to turn in homework.";

    pub async fn execute(client: &CanvasClient, params: &SubmitAssignmentParams) -> CallToolResult {
        info!(
            "Submitting assignment {} in course {} ({})",
            params.assignment_id, params.course_id, params.submission_type
        );

        let body = build_submission_body(params);
        let path = format!(
            "courses/{}/assignments/{}/submissions",
            params.course_id, params.assignment_id
        );
        outcome_result(client.execute(Method::Post, &path, None, Some(&body)).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SubmitAssignmentParams>(),
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
                let params: SubmitAssignmentParams = serde_json::from_value(Value::Object(args))
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
        let params: SubmitAssignmentParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

/// Build the nested submission body Canvas expects. The text body and URL
/// are attached only when they match the declared submission type.
fn build_submission_body(params: &SubmitAssignmentParams) -> Value {
    let mut submission = Map::new();
    submission.insert(
        "submission_type".to_string(),
        json!(params.submission_type),
    );

    if params.submission_type == "online_text_entry"
        && let Some(body) = &params.body
    {
        submission.insert("body".to_string(), json!(body));
    } else if params.submission_type == "online_url"
        && let Some(url) = &params.url
    {
        submission.insert("url".to_string(), json!(url));
    }

    json!({ "submission": submission })
}

// ============================================================================
// get_submission
// ============================================================================

/// Parameters for the get submission tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSubmissionParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The assignment ID.
    #[schemars(description = "The assignment ID")]
    pub assignment_id: i64,

    /// Whose submission to fetch.
    #[schemars(description = "User ID (default: 'self' for current user)")]
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Extra data to include, comma-separated.
    #[schemars(
        description = "Additional information to include (e.g., 'submission_comments,rubric_assessment')"
    )]
    #[serde(default)]
    pub include: Option<String>,
}

fn default_user_id() -> String {
    "self".to_string()
}

/// Get submission details for an assignment.
pub struct GetSubmissionTool;

impl GetSubmissionTool {
    pub const NAME: &'static str = "get_submission";

    pub const DESCRIPTION: &'static str = "Get submission details for an assignment including grade, comments, and submitted content.";

    pub async fn execute(client: &CanvasClient, params: &GetSubmissionParams) -> CallToolResult {
        info!(
            "Getting submission for assignment {} (user {})",
            params.assignment_id, params.user_id
        );

        let mut query = Query::new();
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!(
            "courses/{}/assignments/{}/submissions/{}",
            params.course_id, params.assignment_id, params.user_id
        );
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetSubmissionParams>(),
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
                let params: GetSubmissionParams = serde_json::from_value(Value::Object(args))
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
        let params: GetSubmissionParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_assignments_default_order() {
        let params: ListAssignmentsParams =
            serde_json::from_str(r#"{"course_id": 1}"#).unwrap();
        assert_eq!(params.order_by, "due_at");
    }

    #[test]
    fn test_get_submission_default_user() {
        let params: GetSubmissionParams =
            serde_json::from_str(r#"{"course_id": 1, "assignment_id": 2}"#).unwrap();
        assert_eq!(params.user_id, "self");
    }

    #[test]
    fn test_submission_body_text_entry() {
        let params = SubmitAssignmentParams {
            course_id: 1,
            assignment_id: 2,
            submission_type: "online_text_entry".to_string(),
            body: Some("my essay".to_string()),
            url: None,
        };
        let body = build_submission_body(&params);
        assert_eq!(body["submission"]["submission_type"], "online_text_entry");
        assert_eq!(body["submission"]["body"], "my essay");
        assert!(body["submission"].get("url").is_none());
    }

    #[test]
    fn test_submission_body_url() {
        let params = SubmitAssignmentParams {
            course_id: 1,
            assignment_id: 2,
            submission_type: "online_url".to_string(),
            body: None,
            url: Some("https://example.com/work".to_string()),
        };
        let body = build_submission_body(&params);
        assert_eq!(body["submission"]["url"], "https://example.com/work");
        assert!(body["submission"].get("body").is_none());
    }

    #[test]
    fn test_submission_body_ignores_mismatched_fields() {
        // A text body on a URL submission is dropped, matching the
        // upstream API contract.
        let params = SubmitAssignmentParams {
            course_id: 1,
            assignment_id: 2,
            submission_type: "online_url".to_string(),
            body: Some("stray text".to_string()),
            url: None,
        };
        let body = build_submission_body(&params);
        assert!(body["submission"].get("body").is_none());
        assert!(body["submission"].get("url").is_none());
    }
}
