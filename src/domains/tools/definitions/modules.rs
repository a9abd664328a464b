//! Module tools.
//!
//! Browsing course modules and their items, and tracking progress by
//! marking items done.

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
// list_modules
// ============================================================================

/// Parameters for the list modules tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListModulesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Extra data to include, comma-separated.
    #[schemars(description = "Additional information to include (e.g., 'items,content_details')")]
    #[serde(default)]
    pub include: Option<String>,
}

/// List all modules in a course.
pub struct ListModulesTool;

impl ListModulesTool {
    pub const NAME: &'static str = "list_modules";

    pub const DESCRIPTION: &'static str =
        "List all modules in a course with their names, positions, and completion requirements.";

    pub async fn execute(client: &CanvasClient, params: &ListModulesParams) -> CallToolResult {
        info!("Listing modules for course {}", params.course_id);

        let mut query = Query::new();
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!("courses/{}/modules", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListModulesParams>(),
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
                let params: ListModulesParams = serde_json::from_value(Value::Object(args))
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
        let params: ListModulesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_module_items
// ============================================================================

/// Parameters for the module items tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetModuleItemsParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The module ID.
    #[schemars(description = "The module ID")]
    pub module_id: i64,

    /// Extra data to include, comma-separated.
    #[schemars(description = "Additional information to include (e.g., 'content_details')")]
    #[serde(default)]
    pub include: Option<String>,
}

/// Get the items in a module.
pub struct GetModuleItemsTool;

impl GetModuleItemsTool {
    pub const NAME: &'static str = "get_module_items";

    pub const DESCRIPTION: &'static str =
        "Get all items within a specific module including pages, assignments, quizzes, and files.";

    pub async fn execute(client: &CanvasClient, params: &GetModuleItemsParams) -> CallToolResult {
        info!(
            "Listing items for module {} in course {}",
            params.module_id, params.course_id
        );

        let mut query = Query::new();
        if let Some(include) = &params.include {
            query.push("include[]", split_csv(include));
        }

        let path = format!(
            "courses/{}/modules/{}/items",
            params.course_id, params.module_id
        );
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetModuleItemsParams>(),
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
                let params: GetModuleItemsParams = serde_json::from_value(Value::Object(args))
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
        let params: GetModuleItemsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// mark_module_item_done
// ============================================================================

/// Parameters for the mark-done tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MarkModuleItemDoneParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The module ID.
    #[schemars(description = "The module ID")]
    pub module_id: i64,

    /// The module item ID.
    #[schemars(description = "The module item ID")]
    pub item_id: i64,
}

/// Mark a module item as done.
///
/// Canvas replies 204 here, which the client maps to its success
/// sentinel.
pub struct MarkModuleItemDoneTool;

impl MarkModuleItemDoneTool {
    pub const NAME: &'static str = "mark_module_item_done";

    pub const DESCRIPTION: &'static str =
        "Mark a module item as completed. This tracks your progress through course modules.";

    pub async fn execute(
        client: &CanvasClient,
        params: &MarkModuleItemDoneParams,
    ) -> CallToolResult {
        info!(
            "Marking item {} done in module {} (course {})",
            params.item_id, params.module_id, params.course_id
        );

        let path = format!(
            "courses/{}/modules/{}/items/{}/done",
            params.course_id, params.module_id, params.item_id
        );
        outcome_result(client.execute(Method::Put, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MarkModuleItemDoneParams>(),
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
                let params: MarkModuleItemDoneParams = serde_json::from_value(Value::Object(args))
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
        let params: MarkModuleItemDoneParams =
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
    fn test_mark_done_params() {
        let json = r#"{"course_id": 1, "module_id": 2, "item_id": 3}"#;
        let params: MarkModuleItemDoneParams = serde_json::from_str(json).unwrap();
        assert_eq!((params.course_id, params.module_id, params.item_id), (1, 2, 3));
    }

    #[test]
    fn test_module_items_params_require_ids() {
        let result: Result<GetModuleItemsParams, _> =
            serde_json::from_str(r#"{"course_id": 1}"#);
        assert!(result.is_err());
    }
}
