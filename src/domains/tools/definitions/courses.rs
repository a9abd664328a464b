//! Course tools.
//!
//! Tools for listing and inspecting the courses the current user is
//! enrolled in, including the course syllabus.

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

use super::common::{canvas_error_result, json_result, outcome_result, split_csv};
use crate::domains::canvas::{CanvasClient, Method, Query};

// ============================================================================
// list_courses
// ============================================================================

/// Parameters for the list courses tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCoursesParams {
    /// Enrollment state filter.
    #[schemars(
        description = "Filter by enrollment state (active, invited_or_pending, completed, all)"
    )]
    #[serde(default = "default_enrollment_state")]
    pub enrollment_state: String,

    /// Extra data to include, comma-separated.
    #[schemars(
        description = "Additional information to include (e.g., 'term,syllabus_body,total_scores')"
    )]
    #[serde(default)]
    pub include: Option<String>,
}

fn default_enrollment_state() -> String {
    "active".to_string()
}

/// List the current user's courses.
pub struct ListCoursesTool;

impl ListCoursesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_courses";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all courses the current user is enrolled in. Returns course ID, name, course code, enrollment status, and term.";

    pub async fn execute(client: &CanvasClient, params: &ListCoursesParams) -> CallToolResult {
        info!("Listing courses ({})", params.enrollment_state);

        let mut query = Query::new();
        query.push("enrollment_state", params.enrollment_state.as_str());
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        outcome_result(
            client
                .execute(Method::Get, "courses", Some(&query), None)
                .await,
        )
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListCoursesParams>(),
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
                let params: ListCoursesParams = serde_json::from_value(Value::Object(args))
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
        let params: ListCoursesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_course
// ============================================================================

/// Parameters for the get course tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCourseParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Extra data to include, comma-separated.
    #[schemars(
        description = "Additional information to include (e.g., 'syllabus_body,term,teachers')"
    )]
    #[serde(default)]
    pub include: Option<String>,
}

/// Get details for a specific course.
pub struct GetCourseTool;

impl GetCourseTool {
    pub const NAME: &'static str = "get_course";

    pub const DESCRIPTION: &'static str = "Get detailed information about a specific course including description, syllabus, and settings.";

    pub async fn execute(client: &CanvasClient, params: &GetCourseParams) -> CallToolResult {
        info!("Getting course {}", params.course_id);

        let mut query = Query::new();
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!("courses/{}", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetCourseParams>(),
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
                let params: GetCourseParams = serde_json::from_value(Value::Object(args))
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
        let params: GetCourseParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_course_syllabus
// ============================================================================

/// Parameters for the course syllabus tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCourseSyllabusParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,
}

/// Get the syllabus body for a course.
pub struct GetCourseSyllabusTool;

impl GetCourseSyllabusTool {
    pub const NAME: &'static str = "get_course_syllabus";

    pub const DESCRIPTION: &'static str = "Get the syllabus for a specific course.";

    pub async fn execute(
        client: &CanvasClient,
        params: &GetCourseSyllabusParams,
    ) -> CallToolResult {
        info!("Getting syllabus for course {}", params.course_id);

        let mut query = Query::new();
        query.push("include[]", "syllabus_body");

        let path = format!("courses/{}", params.course_id);
        match client.execute(Method::Get, &path, Some(&query), None).await {
            Ok(course) => json_result(&reshape_syllabus(params.course_id, &course)),
            Err(e) => canvas_error_result(&e),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetCourseSyllabusParams>(),
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
                let params: GetCourseSyllabusParams = serde_json::from_value(Value::Object(args))
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
        let params: GetCourseSyllabusParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

/// Reduce a full course payload to its syllabus fields.
fn reshape_syllabus(course_id: i64, course: &Value) -> Value {
    let syllabus = course
        .get("syllabus_body")
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| json!("No syllabus available"));

    json!({
        "course_id": course_id,
        "course_name": course.get("name").cloned().unwrap_or(Value::Null),
        "syllabus_body": syllabus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_courses_params_default_state() {
        let params: ListCoursesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.enrollment_state, "active");
        assert!(params.include.is_none());
    }

    #[test]
    fn test_get_course_params() {
        let json = r#"{"course_id": 42, "include": "term,teachers"}"#;
        let params: GetCourseParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.course_id, 42);
        assert_eq!(params.include.as_deref(), Some("term,teachers"));
    }

    #[test]
    fn test_reshape_syllabus() {
        let course = json!({"name": "Intro", "syllabus_body": "<p>Welcome</p>"});
        let reshaped = reshape_syllabus(7, &course);
        assert_eq!(reshaped["course_id"], 7);
        assert_eq!(reshaped["course_name"], "Intro");
        assert_eq!(reshaped["syllabus_body"], "<p>Welcome</p>");
    }

    #[test]
    fn test_reshape_syllabus_missing_body() {
        let course = json!({"name": "Intro"});
        let reshaped = reshape_syllabus(7, &course);
        assert_eq!(reshaped["syllabus_body"], "No syllabus available");
    }
}
