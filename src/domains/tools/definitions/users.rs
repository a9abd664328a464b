//! Current-user tools.
//!
//! Profile, enrollments, upcoming events, activity stream, and the to-do
//! list. All of these hit fixed `users/self/...` endpoints and take no
//! parameters.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::info;

use super::common::{NoParams, outcome_result};
use crate::domains::canvas::{CanvasClient, Method};

/// Declare a parameterless tool over a fixed `users/self` endpoint.
macro_rules! self_endpoint_tool {
    ($tool:ident, $name:literal, $description:literal, $endpoint:literal, $log:literal) => {
        pub struct $tool;

        impl $tool {
            pub const NAME: &'static str = $name;

            pub const DESCRIPTION: &'static str = $description;

            pub async fn execute(client: &CanvasClient) -> CallToolResult {
                info!($log);
                outcome_result(client.execute(Method::Get, $endpoint, None, None).await)
            }

            pub fn to_tool() -> Tool {
                Tool {
                    name: Self::NAME.into(),
                    description: Some(Self::DESCRIPTION.into()),
                    input_schema: cached_schema_for_type::<NoParams>(),
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
                ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
                    let client = client.clone();
                    async move { Ok::<_, McpError>(Self::execute(&client).await) }.boxed()
                })
            }

            #[cfg(feature = "http")]
            pub async fn http_handler(
                _arguments: Value,
                client: Arc<CanvasClient>,
            ) -> Result<Value, String> {
                Ok(super::common::http_response(Self::execute(&client).await))
            }
        }
    };
}

self_endpoint_tool!(
    GetUserProfileTool,
    "get_user_profile",
    "Get the current user's profile information including name, email, and avatar.",
    "users/self/profile",
    "Getting user profile"
);

self_endpoint_tool!(
    GetUserEnrollmentsTool,
    "get_user_enrollments",
    "Get all course enrollments for the current user including role and enrollment state.",
    "users/self/enrollments",
    "Getting user enrollments"
);

self_endpoint_tool!(
    GetUpcomingAssignmentsTool,
    "get_upcoming_assignments",
    "Get upcoming assignments and events across all courses for the current user.",
    "users/self/upcoming_events",
    "Getting upcoming events"
);

self_endpoint_tool!(
    GetUserActivityStreamTool,
    "get_user_activity_stream",
    "Get recent activity and notifications for the current user.",
    "users/self/activity_stream",
    "Getting activity stream"
);

self_endpoint_tool!(
    GetTodoItemsTool,
    "get_todo_items",
    "Get all to-do items for the current user including assignments and other tasks.",
    "users/self/todo",
    "Getting to-do items"
);

self_endpoint_tool!(
    ListUserGroupsTool,
    "list_user_groups",
    "List all groups the current user is a member of.",
    "users/self/groups",
    "Listing user groups"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_endpoint_tools_have_distinct_names() {
        let names = [
            GetUserProfileTool::NAME,
            GetUserEnrollmentsTool::NAME,
            GetUpcomingAssignmentsTool::NAME,
            GetUserActivityStreamTool::NAME,
            GetTodoItemsTool::NAME,
            ListUserGroupsTool::NAME,
        ];
        let mut deduped = names.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_profile_tool_metadata() {
        let tool = GetUserProfileTool::to_tool();
        assert_eq!(tool.name, "get_user_profile");
        assert!(tool.description.is_some());
    }
}
