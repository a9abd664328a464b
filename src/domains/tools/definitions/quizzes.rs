//! Quiz tools.
//!
//! The full quiz-taking flow: list and inspect quizzes, start a
//! submission, read its questions, answer them, and finalize the
//! attempt.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::common::outcome_result;
use crate::domains::canvas::{CanvasClient, Method};

// ============================================================================
// list_quizzes
// ============================================================================

/// Parameters for the list quizzes tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListQuizzesParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,
}

/// List all quizzes in a course.
pub struct ListQuizzesTool;

impl ListQuizzesTool {
    pub const NAME: &'static str = "list_quizzes";

    pub const DESCRIPTION: &'static str =
        "List all quizzes in a course with their due dates, time limits, and question counts.";

    pub async fn execute(client: &CanvasClient, params: &ListQuizzesParams) -> CallToolResult {
        info!("Listing quizzes for course {}", params.course_id);

        let path = format!("courses/{}/quizzes", params.course_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListQuizzesParams>(),
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
                let params: ListQuizzesParams = serde_json::from_value(Value::Object(args))
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
        let params: ListQuizzesParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_quiz
// ============================================================================

/// Parameters for the get quiz tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetQuizParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The quiz ID.
    #[schemars(description = "The quiz ID")]
    pub quiz_id: i64,
}

/// Get details for a specific quiz.
pub struct GetQuizTool;

impl GetQuizTool {
    pub const NAME: &'static str = "get_quiz";

    pub const DESCRIPTION: &'static str =
        "Get detailed information about a specific quiz including instructions and settings.";

    pub async fn execute(client: &CanvasClient, params: &GetQuizParams) -> CallToolResult {
        info!("Getting quiz {} in course {}", params.quiz_id, params.course_id);

        let path = format!("courses/{}/quizzes/{}", params.course_id, params.quiz_id);
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetQuizParams>(),
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
                let params: GetQuizParams = serde_json::from_value(Value::Object(args))
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
        let params: GetQuizParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// start_quiz_submission
// ============================================================================

/// Parameters for starting a quiz attempt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StartQuizSubmissionParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The quiz ID.
    #[schemars(description = "The quiz ID")]
    pub quiz_id: i64,
}

/// Start a quiz submission (quiz-taking session).
pub struct StartQuizSubmissionTool;

impl StartQuizSubmissionTool {
    pub const NAME: &'static str = "start_quiz_submission";

    pub const DESCRIPTION: &'static str =
        "Start a quiz submission. This begins a timed quiz attempt.";

    pub async fn execute(
        client: &CanvasClient,
        params: &StartQuizSubmissionParams,
    ) -> CallToolResult {
        info!(
            "Starting submission for quiz {} in course {}",
            params.quiz_id, params.course_id
        );

        let path = format!(
            "courses/{}/quizzes/{}/submissions",
            params.course_id, params.quiz_id
        );
        outcome_result(client.execute(Method::Post, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StartQuizSubmissionParams>(),
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
                let params: StartQuizSubmissionParams =
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
        let params: StartQuizSubmissionParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// get_quiz_questions
// ============================================================================

/// Parameters for reading quiz questions.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetQuizQuestionsParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The quiz ID.
    #[schemars(description = "The quiz ID")]
    pub quiz_id: i64,

    /// The quiz submission ID.
    #[schemars(description = "The quiz submission ID")]
    pub submission_id: i64,
}

/// Get the questions for a quiz submission.
pub struct GetQuizQuestionsTool;

impl GetQuizQuestionsTool {
    pub const NAME: &'static str = "get_quiz_questions";

    pub const DESCRIPTION: &'static str =
        "Get questions for a quiz submission. Use this to see quiz questions during an attempt.";

    pub async fn execute(
        client: &CanvasClient,
        params: &GetQuizQuestionsParams,
    ) -> CallToolResult {
        info!(
            "Getting questions for quiz {} submission {}",
            params.quiz_id, params.submission_id
        );

        let path = format!(
            "courses/{}/quizzes/{}/submissions/{}/questions",
            params.course_id, params.quiz_id, params.submission_id
        );
        outcome_result(client.execute(Method::Get, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetQuizQuestionsParams>(),
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
                let params: GetQuizQuestionsParams = serde_json::from_value(Value::Object(args))
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
        let params: GetQuizQuestionsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// answer_quiz_question
// ============================================================================

/// Parameters for answering a quiz question.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnswerQuizQuestionParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The quiz ID.
    #[schemars(description = "The quiz ID")]
    pub quiz_id: i64,

    /// The quiz submission ID.
    #[schemars(description = "The quiz submission ID")]
    pub submission_id: i64,

    /// The question ID.
    #[schemars(description = "The question ID")]
    pub question_id: i64,

    /// The answer payload; its shape depends on the question type.
    #[schemars(description = "The answer (format depends on question type)")]
    pub answer: Value,
}

/// Answer a question in a quiz submission.
pub struct AnswerQuizQuestionTool;

impl AnswerQuizQuestionTool {
    pub const NAME: &'static str = "answer_quiz_question";

    pub const DESCRIPTION: &'static str =
        "Answer a quiz question. Submit your answer during a quiz attempt.";

    pub async fn execute(
        client: &CanvasClient,
        params: &AnswerQuizQuestionParams,
    ) -> CallToolResult {
        info!(
            "Answering question {} in quiz {} submission {}",
            params.question_id, params.quiz_id, params.submission_id
        );

        // TODO: thread the attempt number and validation_token from the
        // start_quiz_submission response; the fixed values below only
        // work for first attempts without token validation.
        let body = json!({
            "attempt": 1,
            "validation_token": "",
            "quiz_questions": [{
                "id": params.question_id,
                "answer": params.answer,
            }],
        });

        let path = format!(
            "courses/{}/quizzes/{}/submissions/{}/questions",
            params.course_id, params.quiz_id, params.submission_id
        );
        outcome_result(client.execute(Method::Post, &path, None, Some(&body)).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AnswerQuizQuestionParams>(),
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
                let params: AnswerQuizQuestionParams = serde_json::from_value(Value::Object(args))
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
        let params: AnswerQuizQuestionParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;
        Ok(super::common::http_response(
            Self::execute(&client, &params).await,
        ))
    }
}

// ============================================================================
// complete_quiz_submission
// ============================================================================

/// Parameters for completing a quiz attempt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompleteQuizSubmissionParams {
    /// The Canvas course ID.
    #[schemars(description = "The Canvas course ID")]
    pub course_id: i64,

    /// The quiz ID.
    #[schemars(description = "The quiz ID")]
    pub quiz_id: i64,

    /// The quiz submission ID.
    #[schemars(description = "The quiz submission ID")]
    pub submission_id: i64,
}

/// Complete (submit) a quiz submission.
pub struct CompleteQuizSubmissionTool;

impl CompleteQuizSubmissionTool {
    pub const NAME: &'static str = "complete_quiz_submission";

    pub const DESCRIPTION: &'static str =
        "Complete and submit a quiz. This finalizes your quiz attempt.";

    pub async fn execute(
        client: &CanvasClient,
        params: &CompleteQuizSubmissionParams,
    ) -> CallToolResult {
        info!(
            "Completing submission {} for quiz {}",
            params.submission_id, params.quiz_id
        );

        let path = format!(
            "courses/{}/quizzes/{}/submissions/{}/complete",
            params.course_id, params.quiz_id, params.submission_id
        );
        outcome_result(client.execute(Method::Post, &path, None, None).await)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CompleteQuizSubmissionParams>(),
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
                let params: CompleteQuizSubmissionParams =
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
        let params: CompleteQuizSubmissionParams =
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
    fn test_answer_params_accept_any_answer_shape() {
        let scalar = r#"{"course_id": 1, "quiz_id": 2, "submission_id": 3, "question_id": 4, "answer": 7}"#;
        let params: AnswerQuizQuestionParams = serde_json::from_str(scalar).unwrap();
        assert_eq!(params.answer, json!(7));

        let list = r#"{"course_id": 1, "quiz_id": 2, "submission_id": 3, "question_id": 4, "answer": ["a", "b"]}"#;
        let params: AnswerQuizQuestionParams = serde_json::from_str(list).unwrap();
        assert_eq!(params.answer, json!(["a", "b"]));
    }

    #[test]
    fn test_quiz_params_require_ids() {
        let result: Result<GetQuizParams, _> = serde_json::from_str(r#"{"course_id": 1}"#);
        assert!(result.is_err());
    }
}
