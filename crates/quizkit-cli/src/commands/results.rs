//! The `quizkit results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::flow::review_session;
use quizkit_core::model::SessionSummary;

pub(crate) fn print_summary(summary: &SessionSummary) {
    let verdict = if summary.passed { "PASSED" } else { "FAILED" };
    println!(
        "\n{verdict}: {}/{} correct ({:.0}%)",
        summary.score,
        summary.question_count,
        summary.score_percentage * 100.0
    );
    println!(
        "Wrong: {}  Unanswered: {}  Time: {}s",
        summary.wrong_answers, summary.unanswered_questions, summary.time_taken_seconds
    );
}

pub async fn execute(
    config: Option<PathBuf>,
    base_url: Option<String>,
    session_id: String,
) -> Result<()> {
    let client = super::build_client(config.as_deref(), base_url.as_deref())?;
    let review = review_session(&client, &session_id).await?;

    let session = &review.details.session;
    println!("Session {} — quiz {}", session.id, session.quiz_id);
    println!(
        "Score: {}/{}  Active: {}",
        session.score, session.question_count, session.is_active
    );

    let mut table = Table::new();
    table.set_header(vec!["Question", "Your answer", "Correct", "Result"]);
    for question in &review.questions {
        let user = question
            .user_answer
            .map(|n| n.to_string())
            .unwrap_or_else(|| "—".into());
        let correct = question
            .correct_answer
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".into());
        let result = match (question.is_answered, question.is_correct) {
            (false, _) => "unanswered",
            (true, Some(true)) => "correct",
            (true, Some(false)) => "wrong",
            (true, None) => "pending",
        };
        table.add_row(vec![
            Cell::new(&question.question_text),
            Cell::new(user),
            Cell::new(correct),
            Cell::new(result),
        ]);
    }

    println!("\n{table}");
    Ok(())
}
