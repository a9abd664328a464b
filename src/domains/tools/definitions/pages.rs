//! Page tools.

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
// list_pages
// ============================================================================

/// Parameters for the list pages tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPagesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Sort key.
    #[schemars(description = "Sort by (title, created_at, updated_at)")]
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Sort direction.
    #[schemars(description = "Sort order (asc, desc)")]
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_sort() -> String {
    "title".to_string()
}

fn default_order() -> String {
    "asc".to_string()
}

/// List pages in a course.
pub struct ListPagesTool;

impl ListPagesTool {
    pub const NAME: &'static str = "list_pages";

    pub const DESCRIPTION: &'static str =
        "List all pages in a course including titles and URLs.";

    pub async fn execute(client: &CanvasClient, params: &ListPagesParams) -> CallToolResult {
        info!("Listing pages for course {}", params.course_id);

        let mut query = Query::new();
        query.push("sort", params.sort.as_str());
        query.push("order", params.order.as_str());

        let path = format!("courses/{}/pages", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListPagesParams>(),
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
                let params: ListPagesParams = serde_json::from_value(Value::Object(args))
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
        let params: ListPagesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_page
// ============================================================================

/// Parameters for the get page tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPageParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Page selector: the URL slug or page ID.
    #[schemars(description = "The page URL or ID")]
    pub page_url: String,
}

/// Get the content of a specific page.
pub struct GetPageTool;

impl GetPageTool {
    pub const NAME: &'static str = "get_page";

    pub const DESCRIPTION: &'static str = "Get the content of a specific page in a course.";

    pub async fn execute(client: &CanvasClient, params: &GetPageParams) -> CallToolResult {
        info!(
            "Getting page '{}' in course {}",
            params.page_url, params.course_id
        );

        let path = format!("courses/{}/pages/{}", params.course_id, params.page_url);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetPageParams>(),
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
                let params: GetPageParams = serde_json::from_value(Value::Object(args))
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
        let params: GetPageParams =
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
    fn test_list_pages_defaults() {
        let params: ListPagesParams = serde_json::from_str(r#"{"course_id": 1}"#).unwrap();
        assert_eq!(params.sort, "title");
        assert_eq!(params.order, "asc");
    }
}
