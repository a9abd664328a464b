//! Calendar tools.

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

// ============================================================================
// list_calendar_events
// ============================================================================

/// Parameters for the list calendar events tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCalendarEventsParams {
    /// Window start.
    #[schemars(description = "Start date for events (ISO 8601 format, e.g., '2024-01-01')")]
    #[serde(default)]
    pub start_date: Option<String>,

    /// Window end.
    #[schemars(description = "End date for events (ISO 8601 format)")]
    #[serde(default)]
    pub end_date: Option<String>,

    /// Context filter, comma-separated.
    #[schemars(description = "Filter by context (e.g., 'course_123,user_456')")]
    #[serde(default)]
    pub context_codes: Option<String>,
}

/// List calendar events.
pub struct ListCalendarEventsTool;

impl ListCalendarEventsTool {
    pub const NAME: &'static str = "list_calendar_events";

    pub const DESCRIPTION: &'static str =
        "List calendar events including assignments, quizzes, and other due dates.";

    pub async fn execute(
        client: &CanvasClient,
        params: &ListCalendarEventsParams,
    ) -> CallToolResult {
        info!("Listing calendar events");

        let mut query = Query::new();
        query.push("type", "event");
        if let Some(start_date) = &params.start_date {
            query.push("start_date", start_date.as_str());
        }
        if let Some(end_date) = &params.end_date {
            query.push("end_date", end_date.as_str());
        }
        if let Some(context_codes) = &params.context_codes {
            query.push("context_codes[]", split_csv(context_codes));
        }

        outcome_result(
            client
                .execute(Method::Get, "calendar_events", Some(&query), None)
                .await,
        )
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListCalendarEventsParams>(),
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
                let params: ListCalendarEventsParams =
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
        let params: ListCalendarEventsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_calendar_event
// ============================================================================

/// Parameters for the get calendar event tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCalendarEventParams {
    /// The calendar event ID.
    #[schemars(description = "The calendar event ID")]
    pub event_id: i64,
}

/// Get details for a specific calendar event.
pub struct GetCalendarEventTool;

impl GetCalendarEventTool {
    pub const NAME: &'static str = "get_calendar_event";

    pub const DESCRIPTION: &'static str =
        "Get detailed information about a specific calendar event.";

    pub async fn execute(
        client: &CanvasClient,
        params: &GetCalendarEventParams,
    ) -> CallToolResult {
        info!("Getting calendar event {}", params.event_id);

        let path = format!("calendar_events/{}", params.event_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetCalendarEventParams>(),
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
                let params: GetCalendarEventParams = serde_json::from_value(Value::Object(args))
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
        let params: GetCalendarEventParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}
