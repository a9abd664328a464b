//! Rubric tools.

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

use super::common::{canvas_error_result, json_result};
use crate::domains::canvas::{CanvasClient, Method, Query};

/// Parameters for the assignment rubric tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAssignmentRubricParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The assignment ID.
    #[schemars(description = "The assignment ID")]
    pub assignment_id: i64,
}

/// Get the rubric attached to an assignment.
pub struct GetAssignmentRubricTool;

impl GetAssignmentRubricTool {
    pub const NAME: &'static str = "get_assignment_rubric";

    pub const DESCRIPTION: &'static str =
        "Get the rubric for an assignment to understand grading criteria.";

    pub async fn execute(
        client: &CanvasClient,
        params: &GetAssignmentRubricParams,
    ) -> CallToolResult {
        info!(
            "Getting rubric for assignment {} in course {}",
            params.assignment_id, params.course_id
        );

        let mut query = Query::new();
        query.push(
            "include[]",
            vec!["rubric".to_string(), "rubric_assessment".to_string()],
        );

        let path = format!(
            "courses/{}/assignments/{}",
            params.course_id, params.assignment_id
        );
        match client.execute(Method::Get, &path, Some(&query), None).await {
            Ok(assignment) => {
                json_result(&reshape_rubric(params.assignment_id, &assignment))
            }
            Err(e) => canvas_error_result(&e),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetAssignmentRubricParams>(),
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
                let params: GetAssignmentRubricParams =
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
        let params: GetAssignmentRubricParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

/// Reduce a full assignment payload to its rubric fields.
fn reshape_rubric(assignment_id: i64, assignment: &Value) -> Value {
    json!({
        "assignment_id": assignment_id,
        "assignment_name": assignment.get("name").cloned().unwrap_or(Value::Null),
        "rubric": assignment.get("rubric").cloned().unwrap_or(Value::Null),
        "rubric_settings": assignment.get("rubric_settings").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_rubric() {
        let assignment = json!({
            "name": "Essay",
            "rubric": [{"description": "Clarity", "points": 10}],
            "rubric_settings": {"points_possible": 10},
            "due_at": "2024-05-01T00:00:00Z"
        });
        let reshaped = reshape_rubric(4, &assignment);
        assert_eq!(reshaped["assignment_id"], 4);
        assert_eq!(reshaped["assignment_name"], "Essay");
        assert_eq!(reshaped["rubric"][0]["points"], 10);
        // Unrelated assignment fields are dropped
        assert!(reshaped.get("due_at").is_none());
    }

    #[test]
    fn test_reshape_rubric_missing_rubric() {
        let reshaped = reshape_rubric(4, &json!({"name": "Essay"}));
        assert_eq!(reshaped["rubric"], Value::Null);
    }
}
