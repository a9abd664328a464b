//! File and folder tools.

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
// list_course_files
// ============================================================================

/// Parameters for the list course files tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCourseFilesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// Filename filter.
    #[schemars(description = "Search for files by name")]
    #[serde(default)]
    pub search_term: Option<String>,

    /// MIME type filter, comma-separated.
    #[schemars(description = "Filter by content type (e.g., 'application/pdf,image/png')")]
    #[serde(default)]
    pub content_types: Option<String>,
}

/// List files in a course.
pub struct ListCourseFilesTool;

impl ListCourseFilesTool {
    pub const NAME: &'static str = "list_course_files";

    pub const DESCRIPTION: &'static str =
        "List all files in a course including names, sizes, and download URLs.";

    pub async fn execute(client: &CanvasClient, params: &ListCourseFilesParams) -> CallToolResult {
        info!("Listing files for course {}", params.course_id);

        let mut query = Query::new();
        if let Some(search_term) = &params.search_term {
            query.push("search_term", search_term.as_str());
        }
        if let Some(content_types) = &params.content_types {
            query.push("content_types[]", split_csv(content_types));
        }

        let path = format!("courses/{}/files", params.course_id);
        outcome_result(client.execute(Method::Get, &path, Some(&query), None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListCourseFilesParams>(),
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
                let params: ListCourseFilesParams = serde_json::from_value(Value::Object(args))
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
        let params: ListCourseFilesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_file
// ============================================================================

/// Parameters for the get file tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFileParams {
    /// The file ID.
    #[schemars(description = "The file ID")]
    pub file_id: i64,
}

/// Get details for a specific file.
pub struct GetFileTool;

impl GetFileTool {
    pub const NAME: &'static str = "get_file";

    pub const DESCRIPTION: &'static str =
        "Get detailed information about a specific file including download URL and metadata.";

    pub async fn execute(client: &CanvasClient, params: &GetFileParams) -> CallToolResult {
        info!("Getting file {}", params.file_id);

        let path = format!("files/{}", params.file_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetFileParams>(),
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
                let params: GetFileParams = serde_json::from_value(Value::Object(args))
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
        let params: GetFileParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// list_course_folders
// ============================================================================

/// Parameters for the list folders tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCourseFoldersParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,
}

/// List folders in a course.
pub struct ListCourseFoldersTool;

impl ListCourseFoldersTool {
    pub const NAME: &'static str = "list_course_folders";

    pub const DESCRIPTION: &'static str =
        "List all folders in a course to browse course file organization.";

    pub async fn execute(
        client: &CanvasClient,
        params: &ListCourseFoldersParams,
    ) -> CallToolResult {
        info!("Listing folders for course {}", params.course_id);

        let path = format!("courses/{}/folders", params.course_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListCourseFoldersParams>(),
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
                let params: ListCourseFoldersParams = serde_json::from_value(Value::Object(args))
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
        let params: ListCourseFoldersParams =
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
    fn test_list_files_optional_filters() {
        let params: ListCourseFilesParams =
            serde_json::from_str(r#"{"course_id": 1}"#).unwrap();
        assert!(params.search_term.is_none());
        assert!(params.content_types.is_none());
    }
}
