//! Trait seams between the session flow and its collaborators.
//!
//! [`QuizService`] is implemented by the HTTP client in `quizkit-client`
//! (and by its in-memory mock); the flow driver only ever talks to the
//! trait, so session logic is testable without a running service.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::{
    Answer, Quiz, QuizDetails, QuizFilter, QuizQuestion, QuizRequest, QuizSession,
    SessionDetails, SessionQuestion, SessionSummary,
};

/// Operations of the quiz service. Each performs one request against a
/// fixed base origin; none retries, caches, or issues concurrent
/// sub-requests.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// `GET /quizzes/` with optional filters as query parameters.
    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>, ClientError>;

    /// `GET /quizzes/{id}` — quiz with its ordered question list.
    async fn quiz_details(&self, quiz_id: &str) -> Result<QuizDetails, ClientError>;

    /// `POST /quizzes/` — create a quiz from cached questions.
    async fn create_quiz(&self, request: &QuizRequest) -> Result<QuizDetails, ClientError>;

    /// `DELETE /quizzes/{id}`.
    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ClientError>;

    /// `POST /quizzes/{id}/start` — open a new session.
    async fn start_quiz(&self, quiz_id: &str) -> Result<QuizSession, ClientError>;

    /// `GET /sessions/{id}` — session stats with the answer list.
    async fn session_details(&self, session_id: &str) -> Result<SessionDetails, ClientError>;

    /// `GET /sessions/{id}/questions/next` — first unanswered question.
    ///
    /// Returns `Ok(None)` on HTTP 204: the session is fully answered.
    /// This is a distinguished success, never an error.
    async fn next_question(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionQuestion>, ClientError>;

    /// `PUT /sessions/{id}/answers/{question_id}` — store a selection.
    /// Resubmission overwrites the prior answer for the same question.
    async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        selected_option: u32,
    ) -> Result<Answer, ClientError>;

    /// `POST /sessions/{id}/submit` — finalize the session and compute
    /// results. Answer submissions after this are server-defined.
    async fn submit_quiz(&self, session_id: &str) -> Result<SessionSummary, ClientError>;

    /// `GET /quiz-questions/{id}` — single question snapshot, used for
    /// post-hoc review.
    async fn question(&self, question_id: &str) -> Result<QuizQuestion, ClientError>;

    /// `GET /health`.
    async fn health(&self) -> Result<(), ClientError>;
}

/// Chooses an option for each question while a session is driven.
///
/// The CLI implements this over stdin; tests use fixed selections.
#[async_trait]
pub trait AnswerSelector: Send + Sync {
    async fn select(&self, question: &SessionQuestion) -> anyhow::Result<u32>;
}
