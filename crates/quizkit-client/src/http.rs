//! Reqwest implementation of the quiz service client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use quizkit_core::error::ClientError;
use quizkit_core::model::{
    Answer, Quiz, QuizCatalog, QuizDetails, QuizFilter, QuizQuestion, QuizRequest, QuizSession,
    SessionDetails, SessionQuestion, SessionSummary,
};
use quizkit_core::traits::QuizService;

use crate::config::QuizkitConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:8001";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the quiz service.
///
/// Holds only the base origin and a connection pool; all session state
/// lives on the server. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct QuizClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// Error body shape the service uses for non-success responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// `PUT /sessions/{id}/answers/{question_id}` body.
#[derive(Serialize)]
struct AnswerSubmitRequest {
    selected_option: u32,
}

impl QuizClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        }
    }

    pub fn from_config(config: &QuizkitConfig) -> Self {
        Self::new(&config.base_url, config.timeout_secs)
    }

    /// The base origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the quiz list and derive its topics in one call.
    ///
    /// Topics have no endpoint of their own; they are a pure function of
    /// the quiz list (dedup on `topic_id`, first-seen order).
    #[instrument(skip(self))]
    pub async fn list_quizzes_and_topics(&self) -> Result<QuizCatalog, ClientError> {
        let quizzes = self.list_quizzes(&QuizFilter::default()).await?;
        Ok(QuizCatalog::from_quizzes(quizzes))
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::Network(e.to_string())
        }
    }

    /// Turn a success response into its payload, or fail with `Decode`.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Check the status and normalize a non-success response.
    ///
    /// Uses the server's `detail` field when the body parses as JSON with
    /// a string `detail`; anything else (missing body, plain text, a
    /// structured detail) falls back to the operation's default message.
    async fn check(
        &self,
        response: reqwest::Response,
        default_msg: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| default_msg.to_string());
        debug!(status = status.as_u16(), %message, "request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl QuizService for QuizClient {
    #[instrument(skip(self, filter))]
    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>, ClientError> {
        let response = self
            .client
            .get(format!("{}/quizzes/", self.base_url))
            .query(filter)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to fetch quizzes").await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn quiz_details(&self, quiz_id: &str) -> Result<QuizDetails, ClientError> {
        let response = self
            .client
            .get(format!("{}/quizzes/{}", self.base_url, quiz_id))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to fetch quiz details").await?;
        let mut details: QuizDetails = Self::decode(response).await?;
        details.sort_questions();
        Ok(details)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_quiz(&self, request: &QuizRequest) -> Result<QuizDetails, ClientError> {
        let response = self
            .client
            .post(format!("{}/quizzes/", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to create quiz").await?;
        let mut details: QuizDetails = Self::decode(response).await?;
        details.sort_questions();
        Ok(details)
    }

    #[instrument(skip(self))]
    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/quizzes/{}", self.base_url, quiz_id))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.check(response, "Failed to delete quiz").await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn start_quiz(&self, quiz_id: &str) -> Result<QuizSession, ClientError> {
        let response = self
            .client
            .post(format!("{}/quizzes/{}/start", self.base_url, quiz_id))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to start quiz").await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn session_details(&self, session_id: &str) -> Result<SessionDetails, ClientError> {
        let response = self
            .client
            .get(format!("{}/sessions/{}", self.base_url, session_id))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to fetch session").await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn next_question(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionQuestion>, ClientError> {
        let response = self
            .client
            .get(format!(
                "{}/sessions/{}/questions/next",
                self.base_url, session_id
            ))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        // 204 with no body means the session is fully answered.
        if response.status() == StatusCode::NO_CONTENT {
            debug!(session_id, "no unanswered questions left");
            return Ok(None);
        }

        let response = self
            .check(response, "Failed to fetch next question")
            .await?;
        Ok(Some(Self::decode(response).await?))
    }

    #[instrument(skip(self))]
    async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        selected_option: u32,
    ) -> Result<Answer, ClientError> {
        let response = self
            .client
            .put(format!(
                "{}/sessions/{}/answers/{}",
                self.base_url, session_id, question_id
            ))
            .json(&AnswerSubmitRequest { selected_option })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to submit answer").await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn submit_quiz(&self, session_id: &str) -> Result<SessionSummary, ClientError> {
        let response = self
            .client
            .post(format!("{}/sessions/{}/submit", self.base_url, session_id))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to submit quiz").await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn question(&self, question_id: &str) -> Result<QuizQuestion, ClientError> {
        let response = self
            .client
            .get(format!("{}/quiz-questions/{}", self.base_url, question_id))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = self.check(response, "Failed to fetch question").await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.check(response, "Quiz service unavailable").await?;
        Ok(())
    }
}
