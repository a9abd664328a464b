//! Tool definitions.
//!
//! One file per Canvas entity; each tool declares its parameters, an
//! async `execute` over the shared `CanvasClient`, its MCP metadata, and
//! transport adapters (`create_route` for STDIO/TCP, `http_handler` for
//! HTTP).

pub mod announcements;
pub mod assignments;
pub mod calendar;
pub mod common;
pub mod conversations;
pub mod courses;
pub mod discussions;
pub mod files;
pub mod grades;
pub mod groups;
pub mod modules;
pub mod outcomes;
pub mod pages;
pub mod quizzes;
pub mod rubrics;
pub mod server_info;
pub mod users;

pub use announcements::ListAnnouncementsTool;
pub use assignments::{
    GetAssignmentTool, GetSubmissionTool, ListAssignmentsTool, SubmitAssignmentTool,
};
pub use calendar::{GetCalendarEventTool, ListCalendarEventsTool};
pub use conversations::{CreateConversationTool, GetConversationTool, ListConversationsTool};
pub use courses::{GetCourseSyllabusTool, GetCourseTool, ListCoursesTool};
pub use discussions::{CreateDiscussionEntryTool, GetDiscussionTool, ListDiscussionsTool};
pub use files::{GetFileTool, ListCourseFilesTool, ListCourseFoldersTool};
pub use grades::{GetCourseGradesTool, GetUserAssignmentsWithGradesTool};
pub use groups::GetGroupTool;
pub use modules::{GetModuleItemsTool, ListModulesTool, MarkModuleItemDoneTool};
pub use outcomes::ListCourseOutcomesTool;
pub use pages::{GetPageTool, ListPagesTool};
pub use quizzes::{
    AnswerQuizQuestionTool, CompleteQuizSubmissionTool, GetQuizQuestionsTool, GetQuizTool,
    ListQuizzesTool, StartQuizSubmissionTool,
};
pub use rubrics::GetAssignmentRubricTool;
pub use server_info::ServerInfoTool;
pub use users::{
    GetTodoItemsTool, GetUpcomingAssignmentsTool, GetUserActivityStreamTool,
    GetUserEnrollmentsTool, GetUserProfileTool, ListUserGroupsTool,
};
