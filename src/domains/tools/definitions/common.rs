//! Common utilities shared across Canvas tools.
//!
//! Helpers for shaping tool parameters into API queries and rendering
//! gateway outcomes as MCP tool results.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domains::canvas::CanvasError;

/// Empty parameter set for tools that operate on the current user.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Split a comma-separated parameter into list entries.
///
/// Canvas expects repeated `include[]`-style keys; tools split their
/// comma-joined inputs before handing the list to the API client.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render a successful Canvas JSON payload as tool output.
pub fn json_result(value: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Render a Canvas API failure as tool output.
pub fn canvas_error_result(error: &CanvasError) -> CallToolResult {
    warn!("{}", error);
    CallToolResult::error(vec![Content::text(error.to_string())])
}

/// Map a gateway outcome to tool output.
pub fn outcome_result(outcome: Result<Value, CanvasError>) -> CallToolResult {
    match outcome {
        Ok(value) => json_result(&value),
        Err(e) => canvas_error_result(&e),
    }
}

/// Response envelope shared by all HTTP tool handlers.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv("term,syllabus_body"), vec!["term", "syllabus_body"]);
        assert_eq!(split_csv("submission"), vec!["submission"]);
        assert_eq!(split_csv("a, b , c"), vec!["a", "b", "c"]);
        assert!(split_csv("").is_empty());
        assert!(split_csv(" , ").is_empty());
    }

    #[test]
    fn test_json_result_is_success() {
        let result = json_result(&json!({"id": 1}));
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
    }

    #[test]
    fn test_outcome_result_error() {
        let result = outcome_result(Err(CanvasError::MissingToken));
        assert!(result.is_error.unwrap_or(false));
    }
}
