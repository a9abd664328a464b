//! Grade tools.

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

use super::common::outcome_result;
use crate::domains::canvas::{CanvasClient, Method, Query};

// ============================================================================
// get_course_grades
// ============================================================================

/// Parameters for the course grades tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCourseGradesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Whose grades to fetch.
    #[schemars(description = "User ID (default: 'self' for current user)")]
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    "self".to_string()
}

/// Get grades for a course via its enrollments.
pub struct GetCourseGradesTool;

impl GetCourseGradesTool {
    pub const NAME: &'static str = "get_course_grades";

    pub const DESCRIPTION: &'static str =
        "Get all grades for a specific course including current score and grade breakdown.";

    pub async fn execute(client: &CanvasClient, params: &GetCourseGradesParams) -> CallToolResult {
        info!(
            "Getting grades for course {} (user {})",
            params.course_id, params.user_id
        );

        let mut query = Query::new();
        query.push("user_id", params.user_id.as_str());

        let path = format!("courses/{}/enrollments", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetCourseGradesParams>(),
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
                let params: GetCourseGradesParams = serde_json::from_value(Value::Object(args))
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
        let params: GetCourseGradesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_user_assignments_with_grades
// ============================================================================

/// Parameters for the assignments-with-grades tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetUserAssignmentsWithGradesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,
}

/// Get all assignments with submission and grade information for the
/// current user.
pub struct GetUserAssignmentsWithGradesTool;

impl GetUserAssignmentsWithGradesTool {
    pub const NAME: &'static str = "get_user_assignments_with_grades";

    pub const DESCRIPTION: &'static str =
        "Get all assignments with their grades for the current user in a course.";

    pub async fn execute(
        client: &CanvasClient,
        params: &GetUserAssignmentsWithGradesParams,
    ) -> CallToolResult {
        info!(
            "Getting graded assignments for course {}",
            params.course_id
        );

        let mut query = Query::new();
        query.push(
            "include[]",
            vec!["submission".to_string(), "score_statistics".to_string()],
        );

        let path = format!("courses/{}/assignments", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetUserAssignmentsWithGradesParams>(),
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
                let params: GetUserAssignmentsWithGradesParams =
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
        let params: GetUserAssignmentsWithGradesParams =
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
    fn test_course_grades_default_user() {
        let params: GetCourseGradesParams =
            serde_json::from_str(r#"{"course_id": 1}"#).unwrap();
        assert_eq!(params.user_id, "self");
    }
}
