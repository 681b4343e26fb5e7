//! In-memory quiz service for testing.
//!
//! Implements [`QuizService`] without any network, mirroring the server's
//! observable behavior closely enough to exercise the session flow:
//! answers have PUT overwrite semantics, the next-question cursor skips
//! answered questions, and submission computes a summary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use quizkit_core::error::ClientError;
use quizkit_core::model::{
    Answer, AnswerOption, Quiz, QuizDetails, QuizFilter, QuizQuestion, QuizRequest, QuizSession,
    SessionDetails, SessionQuestion, SessionSummary,
};
use quizkit_core::traits::QuizService;

struct SessionState {
    session: QuizSession,
    /// Keyed by quiz question id; insertion overwrites, like the PUT route.
    answers: HashMap<String, Answer>,
}

/// A mock quiz service backed by in-memory state.
pub struct MockQuizService {
    quizzes: Mutex<Vec<QuizDetails>>,
    sessions: Mutex<HashMap<String, SessionState>>,
    next_id: AtomicU32,
    call_count: AtomicU32,
}

impl MockQuizService {
    pub fn new() -> Self {
        Self {
            quizzes: Mutex::new(Vec::new()),
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU32::new(1),
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock pre-seeded with one quiz.
    pub fn with_quiz(quiz: QuizDetails) -> Self {
        let mock = Self::new();
        mock.quizzes.lock().unwrap().push(quiz);
        mock
    }

    /// Number of service calls made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The currently stored selection for a `(session, question)` pair.
    pub fn stored_selection(&self, session_id: &str, question_id: &str) -> Option<u32> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .and_then(|s| s.answers.get(question_id))
            .map(|a| a.selected_option)
    }

    fn tick(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn find_quiz(&self, quiz_id: &str) -> Result<QuizDetails, ClientError> {
        self.quizzes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.quiz.id == quiz_id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Quiz not found".into(),
            })
    }

    fn session_not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: "Session not found".into(),
        }
    }
}

impl Default for MockQuizService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizService for MockQuizService {
    async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>, ClientError> {
        self.tick();
        let quizzes = self.quizzes.lock().unwrap();
        Ok(quizzes
            .iter()
            .map(|d| d.quiz.clone())
            .filter(|q| {
                filter
                    .topic_id
                    .as_ref()
                    .is_none_or(|topic| &q.topic_id == topic)
            })
            .filter(|q| {
                filter
                    .min_question_count
                    .is_none_or(|min| q.question_count >= min)
            })
            .filter(|q| {
                filter
                    .max_question_count
                    .is_none_or(|max| q.question_count <= max)
            })
            .collect())
    }

    async fn quiz_details(&self, quiz_id: &str) -> Result<QuizDetails, ClientError> {
        self.tick();
        self.find_quiz(quiz_id)
    }

    async fn create_quiz(&self, request: &QuizRequest) -> Result<QuizDetails, ClientError> {
        self.tick();
        let details = QuizDetails {
            quiz: Quiz {
                id: self.fresh_id("quiz"),
                name: request.name.clone(),
                user_id: "1".into(),
                topic_id: request.topic_id.clone(),
                topic_name: format!("Topic {}", request.topic_id),
                question_count: 0,
                passing_ratio: request.passing_ratio.unwrap_or(0.7),
                time_limit_seconds: request.time_limit_seconds,
                number_of_attempts: request.number_of_attempts,
                created_at: Utc::now(),
                updated_at: None,
            },
            questions: Vec::new(),
        };
        self.quizzes.lock().unwrap().push(details.clone());
        Ok(details)
    }

    async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ClientError> {
        self.tick();
        let mut quizzes = self.quizzes.lock().unwrap();
        let before = quizzes.len();
        quizzes.retain(|q| q.quiz.id != quiz_id);
        if quizzes.len() == before {
            return Err(ClientError::Api {
                status: 404,
                message: "Quiz not found".into(),
            });
        }
        Ok(())
    }

    async fn start_quiz(&self, quiz_id: &str) -> Result<QuizSession, ClientError> {
        self.tick();
        let quiz = self.find_quiz(quiz_id)?;
        let session = QuizSession {
            id: self.fresh_id("session"),
            quiz_id: quiz.quiz.id.clone(),
            user_id: quiz.quiz.user_id.clone(),
            attempt_number: 1,
            question_progress_index: 0,
            question_count: quiz.questions.len() as u32,
            score: 0,
            wrong_answers: None,
            unanswered_questions: None,
            time_limit_seconds: quiz.quiz.time_limit_seconds,
            is_active: true,
            started_at: Utc::now(),
            completed_at: None,
            completion_details: None,
        };
        self.sessions.lock().unwrap().insert(
            session.id.clone(),
            SessionState {
                session: session.clone(),
                answers: HashMap::new(),
            },
        );
        Ok(session)
    }

    async fn session_details(&self, session_id: &str) -> Result<SessionDetails, ClientError> {
        self.tick();
        let sessions = self.sessions.lock().unwrap();
        let state = sessions.get(session_id).ok_or_else(Self::session_not_found)?;
        let mut answers: Vec<Answer> = state.answers.values().cloned().collect();
        answers.sort_by(|a, b| a.answered_at.cmp(&b.answered_at));
        Ok(SessionDetails {
            session: state.session.clone(),
            answers,
        })
    }

    async fn next_question(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionQuestion>, ClientError> {
        self.tick();
        let sessions = self.sessions.lock().unwrap();
        let state = sessions.get(session_id).ok_or_else(Self::session_not_found)?;
        let quiz = self.find_quiz(&state.session.quiz_id)?;

        let mut remaining: Vec<&QuizQuestion> = quiz
            .questions
            .iter()
            .filter(|q| !state.answers.contains_key(&q.id))
            .collect();
        remaining.sort_by_key(|q| q.order_index);

        Ok(remaining.first().map(|q| SessionQuestion {
            id: q.id.clone(),
            question: q.question.clone(),
            options: q.options.clone(),
            order_index: q.order_index,
        }))
    }

    async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        selected_option: u32,
    ) -> Result<Answer, ClientError> {
        self.tick();
        let quiz_id = {
            let sessions = self.sessions.lock().unwrap();
            let state = sessions.get(session_id).ok_or_else(Self::session_not_found)?;
            state.session.quiz_id.clone()
        };
        let quiz = self.find_quiz(&quiz_id)?;
        let question = quiz
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(ClientError::Api {
                status: 404,
                message: "Question not found".into(),
            })?;

        let mut sessions = self.sessions.lock().unwrap();
        let state = sessions.get_mut(session_id).ok_or_else(Self::session_not_found)?;

        let answer = match state.answers.get(question_id) {
            Some(previous) => Answer {
                selected_option,
                is_correct: question.correct_option.map(|c| c == selected_option),
                updated_at: Some(Utc::now()),
                revision_count: previous.revision_count + 1,
                ..previous.clone()
            },
            None => Answer {
                id: self.fresh_id("answer"),
                quiz_session_id: session_id.into(),
                quiz_question_id: question_id.into(),
                selected_option,
                is_correct: question.correct_option.map(|c| c == selected_option),
                answered_at: Utc::now(),
                updated_at: None,
                submitted_at: None,
                revision_count: 0,
                attempt_number: state.session.attempt_number,
            },
        };
        state.answers.insert(question_id.into(), answer.clone());
        state.session.question_progress_index = state.answers.len() as u32;
        Ok(answer)
    }

    async fn submit_quiz(&self, session_id: &str) -> Result<SessionSummary, ClientError> {
        self.tick();
        let quiz_id = {
            let sessions = self.sessions.lock().unwrap();
            let state = sessions.get(session_id).ok_or_else(Self::session_not_found)?;
            state.session.quiz_id.clone()
        };
        let quiz = self.find_quiz(&quiz_id)?;

        let mut sessions = self.sessions.lock().unwrap();
        let state = sessions.get_mut(session_id).ok_or_else(Self::session_not_found)?;

        let question_count = quiz.questions.len() as u32;
        let score = quiz
            .questions
            .iter()
            .filter(|q| {
                state
                    .answers
                    .get(&q.id)
                    .map(|a| Some(a.selected_option) == q.correct_option)
                    .unwrap_or(false)
            })
            .count() as u32;
        let answered = state.answers.len() as u32;
        let completed_at = Utc::now();

        state.session.is_active = false;
        state.session.score = score;
        state.session.completed_at = Some(completed_at);
        state.session.completion_details = Some("submitted".into());
        for answer in state.answers.values_mut() {
            answer.submitted_at = Some(completed_at);
        }

        let score_percentage = if question_count == 0 {
            0.0
        } else {
            f64::from(score) / f64::from(question_count)
        };
        Ok(SessionSummary {
            id: session_id.into(),
            quiz_id,
            score,
            question_count,
            score_percentage,
            wrong_answers: answered - score,
            unanswered_questions: question_count - answered,
            time_taken_seconds: 0,
            completed_at,
            completion_details: "submitted".into(),
            passed: score_percentage >= quiz.quiz.passing_ratio,
        })
    }

    async fn question(&self, question_id: &str) -> Result<QuizQuestion, ClientError> {
        self.tick();
        let quizzes = self.quizzes.lock().unwrap();
        quizzes
            .iter()
            .flat_map(|q| q.questions.iter())
            .find(|q| q.id == question_id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Question not found".into(),
            })
    }

    async fn health(&self) -> Result<(), ClientError> {
        self.tick();
        Ok(())
    }
}

/// A ready-made two-question fixture quiz.
pub fn sample_quiz() -> QuizDetails {
    fn question(id: &str, order_index: u32, correct: u32) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            name: format!("question {id}"),
            quiz_id: "Q1".into(),
            question_id: format!("src-{id}"),
            question: format!("Question {id}?"),
            options: vec![
                AnswerOption {
                    num: 0,
                    text: "first".into(),
                },
                AnswerOption {
                    num: 1,
                    text: "second".into(),
                },
                AnswerOption {
                    num: 2,
                    text: "third".into(),
                },
            ],
            order_index,
            correct_option: Some(correct),
            explanation: Some("because".into()),
        }
    }

    QuizDetails {
        quiz: Quiz {
            id: "Q1".into(),
            name: "Sample quiz".into(),
            user_id: "1".into(),
            topic_id: "t1".into(),
            topic_name: "Samples".into(),
            question_count: 2,
            passing_ratio: 0.5,
            time_limit_seconds: Some(900),
            number_of_attempts: None,
            created_at: Utc::now(),
            updated_at: None,
        },
        questions: vec![question("P1", 0, 2), question("P2", 1, 0)],
    }
}
