//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its
//! own route; they all share one `CanvasClient`.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

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

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<CanvasClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListCoursesTool::create_route(client.clone()))
        .with_route(GetCourseTool::create_route(client.clone()))
        .with_route(GetCourseSyllabusTool::create_route(client.clone()))
        .with_route(ListAssignmentsTool::create_route(client.clone()))
        .with_route(GetAssignmentTool::create_route(client.clone()))
        .with_route(SubmitAssignmentTool::create_route(client.clone()))
        .with_route(GetSubmissionTool::create_route(client.clone()))
        .with_route(ListModulesTool::create_route(client.clone()))
        .with_route(GetModuleItemsTool::create_route(client.clone()))
        .with_route(MarkModuleItemDoneTool::create_route(client.clone()))
        .with_route(ListDiscussionsTool::create_route(client.clone()))
        .with_route(GetDiscussionTool::create_route(client.clone()))
        .with_route(CreateDiscussionEntryTool::create_route(client.clone()))
        .with_route(ListQuizzesTool::create_route(client.clone()))
        .with_route(GetQuizTool::create_route(client.clone()))
        .with_route(StartQuizSubmissionTool::create_route(client.clone()))
        .with_route(GetQuizQuestionsTool::create_route(client.clone()))
        .with_route(AnswerQuizQuestionTool::create_route(client.clone()))
        .with_route(CompleteQuizSubmissionTool::create_route(client.clone()))
        .with_route(GetCourseGradesTool::create_route(client.clone()))
        .with_route(GetUserAssignmentsWithGradesTool::create_route(client.clone()))
        .with_route(ListCourseFilesTool::create_route(client.clone()))
        .with_route(GetFileTool::create_route(client.clone()))
        .with_route(ListCourseFoldersTool::create_route(client.clone()))
        .with_route(ListAnnouncementsTool::create_route(client.clone()))
        .with_route(ListCalendarEventsTool::create_route(client.clone()))
        .with_route(GetCalendarEventTool::create_route(client.clone()))
        .with_route(GetUserProfileTool::create_route(client.clone()))
        .with_route(GetUserEnrollmentsTool::create_route(client.clone()))
        .with_route(GetUpcomingAssignmentsTool::create_route(client.clone()))
        .with_route(GetUserActivityStreamTool::create_route(client.clone()))
        .with_route(GetTodoItemsTool::create_route(client.clone()))
        .with_route(ListPagesTool::create_route(client.clone()))
        .with_route(GetPageTool::create_route(client.clone()))
        .with_route(ListUserGroupsTool::create_route(client.clone()))
        .with_route(GetGroupTool::create_route(client.clone()))
        .with_route(ListConversationsTool::create_route(client.clone()))
        .with_route(GetConversationTool::create_route(client.clone()))
        .with_route(CreateConversationTool::create_route(client.clone()))
        .with_route(GetAssignmentRubricTool::create_route(client.clone()))
        .with_route(ListCourseOutcomesTool::create_route(client.clone()))
        .with_route(ServerInfoTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::canvas::Credentials;

    struct TestServer {}

    fn test_client() -> Arc<CanvasClient> {
        Arc::new(CanvasClient::new(Credentials::new(
            "https://canvas.test/api/v1",
            "test-token",
        )))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 42);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list_courses"));
        assert!(names.contains(&"get_course_syllabus"));
        assert!(names.contains(&"submit_assignment"));
        assert!(names.contains(&"mark_module_item_done"));
        assert!(names.contains(&"answer_quiz_question"));
        assert!(names.contains(&"create_conversation"));
        assert!(names.contains(&"get_server_info"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router expose the same tools
        let client = test_client();
        let registry = ToolRegistry::new(client.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(client);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name), "missing from router: {name}");
        }
    }
}
