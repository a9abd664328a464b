//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::domains::canvas::CanvasClient;

use super::definitions::{
    AnswerQuizQuestionTool, CompleteQuizSubmissionTool, CreateConversationTool,
    CreateDiscussionEntryTool, GetAssignmentRubricTool, GetAssignmentTool, GetCalendarEventTool,
    GetConversationTool, GetCourseGradesTool, GetCourseSyllabusTool, GetCourseTool,
    GetDiscussionTool, GetFileTool, GetGroupTool, GetModuleItemsTool, GetPageTool,
    GetQuizQuestionsTool, GetQuizTool, GetSubmissionTool, GetTodoItemsTool,
    GetUpcomingAssignmentsTool, GetUserActivityStreamTool, GetUserAssignmentsWithGradesTool,
    GetUserEnrollmentsTool, GetUserProfileTool, ListAnnouncementsTool, ListAssignmentsTool,
    ListCalendarEventsTool, ListConversationsTool, ListCourseFilesTool, ListCourseFoldersTool,
    ListCourseOutcomesTool, ListCoursesTool, ListDiscussionsTool, ListModulesTool,
    ListPagesTool, ListQuizzesTool, ListUserGroupsTool, MarkModuleItemDoneTool, ServerInfoTool,
    StartQuizSubmissionTool, SubmitAssignmentTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    client: Arc<CanvasClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<CanvasClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListCoursesTool::NAME,
            GetCourseTool::NAME,
            GetCourseSyllabusTool::NAME,
            ListAssignmentsTool::NAME,
            GetAssignmentTool::NAME,
            SubmitAssignmentTool::NAME,
            GetSubmissionTool::NAME,
            ListModulesTool::NAME,
            GetModuleItemsTool::NAME,
            MarkModuleItemDoneTool::NAME,
            ListDiscussionsTool::NAME,
            GetDiscussionTool::NAME,
            CreateDiscussionEntryTool::NAME,
            ListQuizzesTool::NAME,
            GetQuizTool::NAME,
            StartQuizSubmissionTool::NAME,
            GetQuizQuestionsTool::NAME,
            AnswerQuizQuestionTool::NAME,
            CompleteQuizSubmissionTool::NAME,
            GetCourseGradesTool::NAME,
            GetUserAssignmentsWithGradesTool::NAME,
            ListCourseFilesTool::NAME,
            GetFileTool::NAME,
            ListCourseFoldersTool::NAME,
            ListAnnouncementsTool::NAME,
            ListCalendarEventsTool::NAME,
            GetCalendarEventTool::NAME,
            GetUserProfileTool::NAME,
            GetUserEnrollmentsTool::NAME,
            GetUpcomingAssignmentsTool::NAME,
            GetUserActivityStreamTool::NAME,
            GetTodoItemsTool::NAME,
            ListPagesTool::NAME,
            GetPageTool::NAME,
            ListUserGroupsTool::NAME,
            GetGroupTool::NAME,
            ListConversationsTool::NAME,
            GetConversationTool::NAME,
            CreateConversationTool::NAME,
            GetAssignmentRubricTool::NAME,
            ListCourseOutcomesTool::NAME,
            ServerInfoTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListCoursesTool::to_tool(),
            GetCourseTool::to_tool(),
            GetCourseSyllabusTool::to_tool(),
            ListAssignmentsTool::to_tool(),
            GetAssignmentTool::to_tool(),
            SubmitAssignmentTool::to_tool(),
            GetSubmissionTool::to_tool(),
            ListModulesTool::to_tool(),
            GetModuleItemsTool::to_tool(),
            MarkModuleItemDoneTool::to_tool(),
            ListDiscussionsTool::to_tool(),
            GetDiscussionTool::to_tool(),
            CreateDiscussionEntryTool::to_tool(),
            ListQuizzesTool::to_tool(),
            GetQuizTool::to_tool(),
            StartQuizSubmissionTool::to_tool(),
            GetQuizQuestionsTool::to_tool(),
            AnswerQuizQuestionTool::to_tool(),
            CompleteQuizSubmissionTool::to_tool(),
            GetCourseGradesTool::to_tool(),
            GetUserAssignmentsWithGradesTool::to_tool(),
            ListCourseFilesTool::to_tool(),
            GetFileTool::to_tool(),
            ListCourseFoldersTool::to_tool(),
            ListAnnouncementsTool::to_tool(),
            ListCalendarEventsTool::to_tool(),
            GetCalendarEventTool::to_tool(),
            GetUserProfileTool::to_tool(),
            GetUserEnrollmentsTool::to_tool(),
            GetUpcomingAssignmentsTool::to_tool(),
            GetUserActivityStreamTool::to_tool(),
            GetTodoItemsTool::to_tool(),
            ListPagesTool::to_tool(),
            GetPageTool::to_tool(),
            ListUserGroupsTool::to_tool(),
            GetGroupTool::to_tool(),
            ListConversationsTool::to_tool(),
            GetConversationTool::to_tool(),
            CreateConversationTool::to_tool(),
            GetAssignmentRubricTool::to_tool(),
            ListCourseOutcomesTool::to_tool(),
            ServerInfoTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let client = self.client.clone();
        match name {
            ListCoursesTool::NAME => ListCoursesTool::http_handler(arguments, client).await,
            GetCourseTool::NAME => GetCourseTool::http_handler(arguments, client).await,
            GetCourseSyllabusTool::NAME => {
                GetCourseSyllabusTool::http_handler(arguments, client).await
            }
            ListAssignmentsTool::NAME => {
                ListAssignmentsTool::http_handler(arguments, client).await
            }
            GetAssignmentTool::NAME => GetAssignmentTool::http_handler(arguments, client).await,
            SubmitAssignmentTool::NAME => {
                SubmitAssignmentTool::http_handler(arguments, client).await
            }
            GetSubmissionTool::NAME => GetSubmissionTool::http_handler(arguments, client).await,
            ListModulesTool::NAME => ListModulesTool::http_handler(arguments, client).await,
            GetModuleItemsTool::NAME => GetModuleItemsTool::http_handler(arguments, client).await,
            MarkModuleItemDoneTool::NAME => {
                MarkModuleItemDoneTool::http_handler(arguments, client).await
            }
            ListDiscussionsTool::NAME => {
                ListDiscussionsTool::http_handler(arguments, client).await
            }
            GetDiscussionTool::NAME => GetDiscussionTool::http_handler(arguments, client).await,
            CreateDiscussionEntryTool::NAME => {
                CreateDiscussionEntryTool::http_handler(arguments, client).await
            }
            ListQuizzesTool::NAME => ListQuizzesTool::http_handler(arguments, client).await,
            GetQuizTool::NAME => GetQuizTool::http_handler(arguments, client).await,
            StartQuizSubmissionTool::NAME => {
                StartQuizSubmissionTool::http_handler(arguments, client).await
            }
            GetQuizQuestionsTool::NAME => {
                GetQuizQuestionsTool::http_handler(arguments, client).await
            }
            AnswerQuizQuestionTool::NAME => {
                AnswerQuizQuestionTool::http_handler(arguments, client).await
            }
            CompleteQuizSubmissionTool::NAME => {
                CompleteQuizSubmissionTool::http_handler(arguments, client).await
            }
            GetCourseGradesTool::NAME => {
                GetCourseGradesTool::http_handler(arguments, client).await
            }
            GetUserAssignmentsWithGradesTool::NAME => {
                GetUserAssignmentsWithGradesTool::http_handler(arguments, client).await
            }
            ListCourseFilesTool::NAME => {
                ListCourseFilesTool::http_handler(arguments, client).await
            }
            GetFileTool::NAME => GetFileTool::http_handler(arguments, client).await,
            ListCourseFoldersTool::NAME => {
                ListCourseFoldersTool::http_handler(arguments, client).await
            }
            ListAnnouncementsTool::NAME => {
                ListAnnouncementsTool::http_handler(arguments, client).await
            }
            ListCalendarEventsTool::NAME => {
                ListCalendarEventsTool::http_handler(arguments, client).await
            }
            GetCalendarEventTool::NAME => {
                GetCalendarEventTool::http_handler(arguments, client).await
            }
            GetUserProfileTool::NAME => GetUserProfileTool::http_handler(arguments, client).await,
            GetUserEnrollmentsTool::NAME => {
                GetUserEnrollmentsTool::http_handler(arguments, client).await
            }
            GetUpcomingAssignmentsTool::NAME => {
                GetUpcomingAssignmentsTool::http_handler(arguments, client).await
            }
            GetUserActivityStreamTool::NAME => {
                GetUserActivityStreamTool::http_handler(arguments, client).await
            }
            GetTodoItemsTool::NAME => GetTodoItemsTool::http_handler(arguments, client).await,
            ListPagesTool::NAME => ListPagesTool::http_handler(arguments, client).await,
            GetPageTool::NAME => GetPageTool::http_handler(arguments, client).await,
            ListUserGroupsTool::NAME => ListUserGroupsTool::http_handler(arguments, client).await,
            GetGroupTool::NAME => GetGroupTool::http_handler(arguments, client).await,
            ListConversationsTool::NAME => {
                ListConversationsTool::http_handler(arguments, client).await
            }
            GetConversationTool::NAME => {
                GetConversationTool::http_handler(arguments, client).await
            }
            CreateConversationTool::NAME => {
                CreateConversationTool::http_handler(arguments, client).await
            }
            GetAssignmentRubricTool::NAME => {
                GetAssignmentRubricTool::http_handler(arguments, client).await
            }
            ListCourseOutcomesTool::NAME => {
                ListCourseOutcomesTool::http_handler(arguments, client).await
            }
            ServerInfoTool::NAME => ServerInfoTool::http_handler(arguments, client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::canvas::Credentials;

    fn test_client() -> Arc<CanvasClient> {
        Arc::new(CanvasClient::new(Credentials::new(
            "https://canvas.test/api/v1",
            "test-token",
        )))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        assert_eq!(names.len(), 42);
        assert!(names.contains(&"list_courses"));
        assert!(names.contains(&"get_course"));
        assert!(names.contains(&"submit_assignment"));
        assert!(names.contains(&"start_quiz_submission"));
        assert!(names.contains(&"get_todo_items"));
        assert!(names.contains(&"get_server_info"));
    }

    #[test]
    fn test_registry_names_match_metadata() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(names.len(), tools.len());
        for tool in tools {
            assert!(names.contains(&tool.name.as_ref()), "unlisted tool: {}", tool.name);
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_server_info() {
        let registry = ToolRegistry::new(test_client());
        let result = registry
            .call_tool("get_server_info", serde_json::json!({}))
            .await;
        assert!(result.is_ok());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }
}
