//! Learning outcome tools.

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
use crate::domains::canvas::{CanvasClient, Method};

/// Parameters for the course outcomes tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCourseOutcomesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,
}

/// List learning outcomes linked to a course.
pub struct ListCourseOutcomesTool;

impl ListCourseOutcomesTool {
    pub const NAME: &'static str = "list_course_outcomes";

    pub const DESCRIPTION: &'static str = "List learning outcomes for a course.";

    pub async fn execute(
        client: &CanvasClient,
        params: &ListCourseOutcomesParams,
    ) -> CallToolResult {
        info!("Listing outcomes for course {}", params.course_id);

        let path = format!("courses/{}/outcome_group_links", params.course_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListCourseOutcomesParams>(),
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
                let params: ListCourseOutcomesParams =
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
        let params: ListCourseOutcomesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}
