//! The `quizkit show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::traits::QuizService;

pub async fn execute(
    config: Option<PathBuf>,
    base_url: Option<String>,
    quiz_id: String,
) -> Result<()> {
    let client = super::build_client(config.as_deref(), base_url.as_deref())?;
    let details = client.quiz_details(&quiz_id).await?;

    println!("{} ({})", details.quiz.name, details.quiz.id);
    println!("Topic: {}", details.quiz.topic_name);
    println!("Questions: {}", details.quiz.question_count);
    println!("Passing ratio: {:.0}%", details.quiz.passing_ratio * 100.0);
    match details.quiz.time_limit_seconds {
        Some(secs) => println!("Time limit: {secs}s"),
        None => println!("Time limit: none"),
    }
    match details.quiz.number_of_attempts {
        Some(n) => println!("Attempts: {n}"),
        None => println!("Attempts: unlimited"),
    }

    if details.questions.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Question ID", "Name", "Options"]);
    for question in &details.questions {
        table.add_row(vec![
            Cell::new(question.order_index + 1),
            Cell::new(&question.id),
            Cell::new(&question.name),
            Cell::new(question.options.len()),
        ]);
    }
    println!("\n{table}");
    Ok(())
}
