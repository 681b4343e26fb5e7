//! quizkit-core — Data model, errors, and session flow for the quiz service client.
//!
//! This crate defines the wire types, the unified [`error::ClientError`],
//! the [`traits::QuizService`] seam implemented by `quizkit-client`, and
//! the session flow driver that sequences a quiz attempt from start to
//! submitted summary.

pub mod error;
pub mod flow;
pub mod model;
pub mod traits;
