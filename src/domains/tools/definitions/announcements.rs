//! Announcement tools.

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

/// Parameters for the list announcements tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAnnouncementsParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Only announcements after this date.
    #[schemars(description = "Filter announcements after this date (ISO 8601 format)")]
    #[serde(default)]
    pub start_date: Option<String>,

    /// Only announcements before this date.
    #[schemars(description = "Filter announcements before this date (ISO 8601 format)")]
    #[serde(default)]
    pub end_date: Option<String>,
}

/// List announcements in a course.
///
/// The announcements endpoint is global; the course is selected through
/// a `context_codes[]` parameter.
pub struct ListAnnouncementsTool;

impl ListAnnouncementsTool {
    pub const NAME: &'static str = "list_announcements";

    pub const DESCRIPTION: &'static str =
        "List all announcements in a course with their titles and posted dates.";

    pub async fn execute(
        client: &CanvasClient,
        params: &ListAnnouncementsParams,
    ) -> CallToolResult {
        info!("Listing announcements for course {}", params.course_id);

        let mut query = Query::new();
        query.push("context_codes[]", format!("course_{}", params.course_id));
        if let Some(start_date) = &params.start_date {
            query.push("start_date", start_date.as_str());
        }
        if let Some(end_date) = &params.end_date {
            query.push("end_date", end_date.as_str());
        }

        outcome_result(
            client
                .execute(Method::Get, "announcements", Some(&query), None)
                .await,
        )
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListAnnouncementsParams>(),
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
                let params: ListAnnouncementsParams = serde_json::from_value(Value::Object(args))
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
        let params: ListAnnouncementsParams =
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
    fn test_announcement_params_dates_optional() {
        let params: ListAnnouncementsParams =
            serde_json::from_str(r#"{"course_id": 9}"#).unwrap();
        assert_eq!(params.course_id, 9);
        assert!(params.start_date.is_none());
        assert!(params.end_date.is_none());
    }
}
