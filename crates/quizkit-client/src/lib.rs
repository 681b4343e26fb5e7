//! quizkit-client — HTTP integration for the quiz service.
//!
//! Implements the `QuizService` trait over reqwest, loads client
//! configuration, and ships an in-memory mock service for tests and
//! offline use.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, QuizkitConfig};
pub use http::QuizClient;
pub use mock::MockQuizService;
