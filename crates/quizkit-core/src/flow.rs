//! Session flow driver.
//!
//! Expresses the interaction contract as code: start a session, answer
//! until the service reports no unanswered questions, submit, and
//! optionally assemble a post-hoc review. Calls are strictly sequential;
//! each one is awaited before the next is issued.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::model::{QuestionReview, SessionDetails, SessionSummary};
use crate::traits::{AnswerSelector, QuizService};

/// Drive a quiz session from start to submitted summary.
///
/// Loops `next_question` / `submit_answer` until the service signals
/// completion (`Ok(None)`), then submits the session. No retry and no
/// caching; a failed call aborts the flow and leaves the session as the
/// server last saw it.
#[instrument(skip(service, selector))]
pub async fn run_session(
    service: &dyn QuizService,
    quiz_id: &str,
    selector: &dyn AnswerSelector,
) -> Result<SessionSummary> {
    let session = service
        .start_quiz(quiz_id)
        .await
        .with_context(|| format!("failed to start quiz {quiz_id}"))?;
    debug!(session_id = %session.id, questions = session.question_count, "session started");

    let mut answered = 0u32;
    while let Some(question) = service.next_question(&session.id).await? {
        let selected = selector
            .select(&question)
            .await
            .with_context(|| format!("no selection for question {}", question.id))?;
        service
            .submit_answer(&session.id, &question.id, selected)
            .await?;
        answered += 1;
    }

    debug!(answered, "no questions left, submitting session");
    let summary = service
        .submit_quiz(&session.id)
        .await
        .with_context(|| format!("failed to submit session {}", session.id))?;
    Ok(summary)
}

/// A submitted session's stats plus its per-question breakdown.
#[derive(Debug, Clone)]
pub struct SessionReview {
    pub details: SessionDetails,
    pub questions: Vec<QuestionReview>,
}

/// Assemble a post-hoc review for a session.
///
/// Fetches the session stats and the quiz's ordered question list, then
/// refetches each answered question individually — the single-question
/// endpoint is the one that carries `correct_option` once a session is
/// finalized.
#[instrument(skip(service))]
pub async fn review_session(
    service: &dyn QuizService,
    session_id: &str,
) -> Result<SessionReview> {
    let details = service
        .session_details(session_id)
        .await
        .with_context(|| format!("failed to fetch session {session_id}"))?;
    let mut quiz = service.quiz_details(&details.session.quiz_id).await?;
    quiz.sort_questions();

    let mut questions = Vec::with_capacity(quiz.questions.len());
    for snapshot in &quiz.questions {
        let answer = details
            .answers
            .iter()
            .find(|a| a.quiz_question_id == snapshot.id);
        let review = match answer {
            Some(answer) => {
                let full = service.question(&snapshot.id).await?;
                QuestionReview {
                    question_id: snapshot.id.clone(),
                    question_text: full.question,
                    user_answer: Some(answer.selected_option),
                    correct_answer: full.correct_option,
                    is_correct: answer.is_correct,
                    is_answered: true,
                }
            }
            None => QuestionReview {
                question_id: snapshot.id.clone(),
                question_text: snapshot.question.clone(),
                user_answer: None,
                correct_answer: snapshot.correct_option,
                is_correct: None,
                is_answered: false,
            },
        };
        questions.push(review);
    }

    Ok(SessionReview { details, questions })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::error::ClientError;
    use crate::model::{
        Answer, AnswerOption, Quiz, QuizDetails, QuizFilter, QuizQuestion, QuizRequest,
        QuizSession, SessionQuestion,
    };

    fn options() -> Vec<AnswerOption> {
        vec![
            AnswerOption {
                num: 0,
                text: "yes".into(),
            },
            AnswerOption {
                num: 1,
                text: "no".into(),
            },
        ]
    }

    fn snapshot(id: &str, order_index: u32, correct: u32) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            name: format!("question {id}"),
            quiz_id: "Q1".into(),
            question_id: format!("src-{id}"),
            question: format!("is {id} the answer?"),
            options: options(),
            order_index,
            correct_option: Some(correct),
            explanation: None,
        }
    }

    /// In-memory service with a single two-question quiz.
    struct ScriptedService {
        questions: Vec<QuizQuestion>,
        answers: Mutex<HashMap<String, u32>>,
        submitted: Mutex<bool>,
    }

    impl ScriptedService {
        fn new() -> Self {
            Self {
                questions: vec![snapshot("P1", 0, 1), snapshot("P2", 1, 0)],
                answers: Mutex::new(HashMap::new()),
                submitted: Mutex::new(false),
            }
        }

        fn quiz(&self) -> Quiz {
            Quiz {
                id: "Q1".into(),
                name: "test quiz".into(),
                user_id: "1".into(),
                topic_id: "t1".into(),
                topic_name: "Testing".into(),
                question_count: self.questions.len() as u32,
                passing_ratio: 0.5,
                time_limit_seconds: None,
                number_of_attempts: None,
                created_at: Utc::now(),
                updated_at: None,
            }
        }
    }

    #[async_trait]
    impl QuizService for ScriptedService {
        async fn list_quizzes(&self, _filter: &QuizFilter) -> Result<Vec<Quiz>, ClientError> {
            Ok(vec![self.quiz()])
        }

        async fn quiz_details(&self, _quiz_id: &str) -> Result<QuizDetails, ClientError> {
            Ok(QuizDetails {
                quiz: self.quiz(),
                questions: self.questions.clone(),
            })
        }

        async fn create_quiz(&self, _request: &QuizRequest) -> Result<QuizDetails, ClientError> {
            self.quiz_details("Q1").await
        }

        async fn delete_quiz(&self, _quiz_id: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn start_quiz(&self, quiz_id: &str) -> Result<QuizSession, ClientError> {
            if quiz_id != "Q1" {
                return Err(ClientError::Api {
                    status: 404,
                    message: "Quiz not found".into(),
                });
            }
            Ok(QuizSession {
                id: "S1".into(),
                quiz_id: "Q1".into(),
                user_id: "1".into(),
                attempt_number: 1,
                question_progress_index: 0,
                question_count: self.questions.len() as u32,
                score: 0,
                wrong_answers: None,
                unanswered_questions: None,
                time_limit_seconds: None,
                is_active: true,
                started_at: Utc::now(),
                completed_at: None,
                completion_details: None,
            })
        }

        async fn session_details(&self, session_id: &str) -> Result<SessionDetails, ClientError> {
            let answers = self.answers.lock().unwrap();
            let session = QuizSession {
                id: session_id.into(),
                quiz_id: "Q1".into(),
                user_id: "1".into(),
                attempt_number: 1,
                question_progress_index: answers.len() as u32,
                question_count: self.questions.len() as u32,
                score: 0,
                wrong_answers: None,
                unanswered_questions: None,
                time_limit_seconds: None,
                is_active: !*self.submitted.lock().unwrap(),
                started_at: Utc::now(),
                completed_at: None,
                completion_details: None,
            };
            let answers = answers
                .iter()
                .map(|(qid, selected)| Answer {
                    id: format!("a-{qid}"),
                    quiz_session_id: session_id.into(),
                    quiz_question_id: qid.clone(),
                    selected_option: *selected,
                    is_correct: self
                        .questions
                        .iter()
                        .find(|q| q.id == *qid)
                        .map(|q| q.correct_option == Some(*selected)),
                    answered_at: Utc::now(),
                    updated_at: None,
                    submitted_at: None,
                    revision_count: 0,
                    attempt_number: 1,
                })
                .collect();
            Ok(SessionDetails { session, answers })
        }

        async fn next_question(
            &self,
            _session_id: &str,
        ) -> Result<Option<SessionQuestion>, ClientError> {
            let answers = self.answers.lock().unwrap();
            Ok(self
                .questions
                .iter()
                .find(|q| !answers.contains_key(&q.id))
                .map(|q| SessionQuestion {
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
            self.answers
                .lock()
                .unwrap()
                .insert(question_id.into(), selected_option);
            Ok(Answer {
                id: format!("a-{question_id}"),
                quiz_session_id: session_id.into(),
                quiz_question_id: question_id.into(),
                selected_option,
                is_correct: None,
                answered_at: Utc::now(),
                updated_at: None,
                submitted_at: None,
                revision_count: 0,
                attempt_number: 1,
            })
        }

        async fn submit_quiz(&self, session_id: &str) -> Result<SessionSummary, ClientError> {
            *self.submitted.lock().unwrap() = true;
            let answers = self.answers.lock().unwrap();
            let score = self
                .questions
                .iter()
                .filter(|q| answers.get(&q.id).copied() == q.correct_option)
                .count() as u32;
            let question_count = self.questions.len() as u32;
            Ok(SessionSummary {
                id: session_id.into(),
                quiz_id: "Q1".into(),
                score,
                question_count,
                score_percentage: f64::from(score) / f64::from(question_count),
                wrong_answers: answers.len() as u32 - score,
                unanswered_questions: question_count - answers.len() as u32,
                time_taken_seconds: 5,
                completed_at: Utc::now(),
                completion_details: "submitted".into(),
                passed: score * 2 >= question_count,
            })
        }

        async fn question(&self, question_id: &str) -> Result<QuizQuestion, ClientError> {
            self.questions
                .iter()
                .find(|q| q.id == question_id)
                .cloned()
                .ok_or(ClientError::Api {
                    status: 404,
                    message: "Question not found".into(),
                })
        }

        async fn health(&self) -> Result<(), ClientError> {
            Ok(())
        }
    }

    /// Selector that answers each question with a fixed option.
    struct FixedSelector(u32);

    #[async_trait]
    impl AnswerSelector for FixedSelector {
        async fn select(&self, _question: &SessionQuestion) -> Result<u32> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn drives_session_to_summary() {
        let service = ScriptedService::new();
        let summary = run_session(&service, "Q1", &FixedSelector(1)).await.unwrap();
        assert_eq!(summary.id, "S1");
        assert_eq!(summary.question_count, 2);
        // option 1 is correct for P1 only
        assert_eq!(summary.score, 1);
        assert_eq!(summary.unanswered_questions, 0);
        assert!(*service.submitted.lock().unwrap());
    }

    #[tokio::test]
    async fn unknown_quiz_aborts_before_answering() {
        let service = ScriptedService::new();
        let err = run_session(&service, "missing", &FixedSelector(0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to start quiz"));
        assert!(service.answers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn review_covers_answered_and_unanswered() {
        let service = ScriptedService::new();
        service.answers.lock().unwrap().insert("P1".into(), 1);

        let review = review_session(&service, "S1").await.unwrap();
        assert_eq!(review.questions.len(), 2);

        let first = &review.questions[0];
        assert_eq!(first.question_id, "P1");
        assert!(first.is_answered);
        assert_eq!(first.user_answer, Some(1));
        assert_eq!(first.correct_answer, Some(1));
        assert_eq!(first.is_correct, Some(true));

        let second = &review.questions[1];
        assert_eq!(second.question_id, "P2");
        assert!(!second.is_answered);
        assert_eq!(second.user_answer, None);
    }
}
