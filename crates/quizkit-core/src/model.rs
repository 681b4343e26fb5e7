//! Wire data model for the quiz service.
//!
//! All identifiers are server-assigned strings and all timestamps are UTC.
//! Types deserialize leniently: fields the service omits in some responses
//! (review-only fields, optional stats) are `Option` with serde defaults.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option index, the value submitted as `selected_option`.
    pub num: u32,
    /// Display text.
    pub text: String,
}

/// A quiz as returned by the quiz list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub user_id: String,
    /// Topic this quiz belongs to. Topics are derived from quizzes
    /// client-side; there is no separate topic fetch.
    pub topic_id: String,
    pub topic_name: String,
    pub question_count: u32,
    pub passing_ratio: f64,
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,
    /// `None` means unlimited attempts.
    #[serde(default)]
    pub number_of_attempts: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A question snapshot cached inside a quiz.
///
/// While a session is active the service omits `correct_option` and
/// `explanation`; they appear only in post-hoc review responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub name: String,
    pub quiz_id: String,
    /// Source question this snapshot was taken from.
    pub question_id: String,
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub order_index: u32,
    #[serde(default)]
    pub correct_option: Option<u32>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A quiz with its full ordered question list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDetails {
    #[serde(flatten)]
    pub quiz: Quiz,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl QuizDetails {
    /// Sort questions into presentation order. The service usually returns
    /// them ordered already; this makes it an invariant.
    pub fn sort_questions(&mut self) {
        self.questions.sort_by_key(|q| q.order_index);
    }
}

/// The "next unanswered question" payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub order_index: u32,
}

/// A server-tracked attempt at a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub attempt_number: u32,
    pub question_progress_index: u32,
    pub question_count: u32,
    pub score: u32,
    #[serde(default)]
    pub wrong_answers: Option<u32>,
    #[serde(default)]
    pub unanswered_questions: Option<u32>,
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,
    pub is_active: bool,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_details: Option<String>,
}

/// A stored answer for a `(session, question)` pair.
///
/// Answers have PUT semantics: resubmitting for the same question
/// overwrites the stored selection and bumps `revision_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub quiz_session_id: String,
    pub quiz_question_id: String,
    pub selected_option: u32,
    #[serde(default)]
    pub is_correct: Option<bool>,
    pub answered_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    pub revision_count: u32,
    pub attempt_number: u32,
}

/// Session stats with the full answer list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetails {
    #[serde(flatten)]
    pub session: QuizSession,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Computed results returned when a session is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub quiz_id: String,
    pub score: u32,
    pub question_count: u32,
    pub score_percentage: f64,
    pub wrong_answers: u32,
    pub unanswered_questions: u32,
    pub time_taken_seconds: u64,
    pub completed_at: DateTime<Utc>,
    pub completion_details: String,
    pub passed: bool,
}

/// Per-question result assembled during post-hoc review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub question_text: String,
    pub user_answer: Option<u32>,
    /// `None` when the service withheld the correct option.
    pub correct_answer: Option<u32>,
    pub is_correct: Option<bool>,
    pub is_answered: bool,
}

/// Request body for creating a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    pub name: String,
    pub topic_id: String,
    /// How many questions to pull into the quiz.
    pub limit: u32,
    pub randomize: bool,
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,
    #[serde(default)]
    pub passing_ratio: Option<f64>,
    #[serde(default)]
    pub number_of_attempts: Option<u32>,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            topic_id: String::new(),
            limit: 10,
            randomize: true,
            time_limit_seconds: Some(900),
            passing_ratio: Some(0.7),
            number_of_attempts: None,
        }
    }
}

/// Optional query filters for the quiz list. `None` fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_question_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_question_count: Option<u32>,
}

/// A topic, derived from the quiz list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

/// The quiz list together with its derived topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCatalog {
    pub quizzes: Vec<Quiz>,
    pub topics: Vec<Topic>,
}

impl QuizCatalog {
    /// Build a catalog from a quiz list, deriving the topics.
    pub fn from_quizzes(quizzes: Vec<Quiz>) -> Self {
        let topics = derive_topics(&quizzes);
        Self { quizzes, topics }
    }
}

/// Derive the topic list from a quiz list.
///
/// One entry per distinct `topic_id`, first occurrence wins, in order of
/// first appearance. Topics have no source of truth of their own; any
/// fetch of the same quiz list derives the same topics.
pub fn derive_topics(quizzes: &[Quiz]) -> Vec<Topic> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();
    for quiz in quizzes {
        if seen.insert(quiz.topic_id.as_str()) {
            topics.push(Topic {
                id: quiz.topic_id.clone(),
                name: quiz.topic_name.clone(),
            });
        }
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(id: &str, topic_id: &str, topic_name: &str) -> Quiz {
        Quiz {
            id: id.into(),
            name: format!("quiz {id}"),
            user_id: "1".into(),
            topic_id: topic_id.into(),
            topic_name: topic_name.into(),
            question_count: 10,
            passing_ratio: 0.7,
            time_limit_seconds: Some(900),
            number_of_attempts: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn topics_dedup_first_seen_order() {
        let quizzes = vec![
            quiz("q1", "1", "Math"),
            quiz("q2", "2", "Sci"),
            quiz("q3", "1", "Math"),
        ];
        let topics = derive_topics(&quizzes);
        assert_eq!(
            topics,
            vec![
                Topic {
                    id: "1".into(),
                    name: "Math".into()
                },
                Topic {
                    id: "2".into(),
                    name: "Sci".into()
                },
            ]
        );
    }

    #[test]
    fn topics_first_occurrence_wins_on_name() {
        let quizzes = vec![quiz("q1", "1", "Math"), quiz("q2", "1", "Mathematics")];
        let topics = derive_topics(&quizzes);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].name, "Math");
    }

    #[test]
    fn empty_quiz_list_gives_empty_catalog() {
        let catalog = QuizCatalog::from_quizzes(vec![]);
        assert!(catalog.quizzes.is_empty());
        assert!(catalog.topics.is_empty());
    }

    #[test]
    fn catalog_topics_match_derivation() {
        let quizzes = vec![quiz("q1", "t1", "History"), quiz("q2", "t2", "Geography")];
        let derived = derive_topics(&quizzes);
        let catalog = QuizCatalog::from_quizzes(quizzes);
        assert_eq!(catalog.topics, derived);
    }

    #[test]
    fn quiz_details_sorts_by_order_index() {
        let mut details = QuizDetails {
            quiz: quiz("q1", "1", "Math"),
            questions: vec![
                QuizQuestion {
                    id: "b".into(),
                    name: "second".into(),
                    quiz_id: "q1".into(),
                    question_id: "src-b".into(),
                    question: "?".into(),
                    options: vec![],
                    order_index: 1,
                    correct_option: None,
                    explanation: None,
                },
                QuizQuestion {
                    id: "a".into(),
                    name: "first".into(),
                    quiz_id: "q1".into(),
                    question_id: "src-a".into(),
                    question: "?".into(),
                    options: vec![],
                    order_index: 0,
                    correct_option: None,
                    explanation: None,
                },
            ],
        };
        details.sort_questions();
        assert_eq!(details.questions[0].id, "a");
        assert_eq!(details.questions[1].id, "b");
    }

    #[test]
    fn session_details_flattens_session_fields() {
        let json = serde_json::json!({
            "id": "S1",
            "quiz_id": "Q1",
            "user_id": "1",
            "attempt_number": 1,
            "question_progress_index": 0,
            "question_count": 2,
            "score": 0,
            "is_active": true,
            "started_at": "2026-01-10T12:00:00Z",
            "answers": []
        });
        let details: SessionDetails = serde_json::from_value(json).unwrap();
        assert_eq!(details.session.id, "S1");
        assert!(details.answers.is_empty());
        assert!(details.session.completed_at.is_none());
    }

    #[test]
    fn quiz_filter_omits_none_from_query() {
        let filter = QuizFilter {
            topic_id: Some("t1".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&filter).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["topic_id"], "t1");
    }
}
