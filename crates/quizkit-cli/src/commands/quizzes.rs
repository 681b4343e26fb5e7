//! The `quizkit quizzes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::model::QuizFilter;
use quizkit_core::traits::QuizService;

pub async fn execute(
    config: Option<PathBuf>,
    base_url: Option<String>,
    topic: Option<String>,
    active: bool,
) -> Result<()> {
    let client = super::build_client(config.as_deref(), base_url.as_deref())?;

    let filter = QuizFilter {
        topic_id: topic,
        is_active: active.then_some(true),
        ..Default::default()
    };
    let quizzes = client.list_quizzes(&filter).await?;

    if quizzes.is_empty() {
        println!("No quizzes match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz ID", "Name", "Topic", "Questions", "Pass ratio"]);
    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.name),
            Cell::new(&quiz.topic_name),
            Cell::new(quiz.question_count),
            Cell::new(format!("{:.0}%", quiz.passing_ratio * 100.0)),
        ]);
    }

    println!("{table}");
    println!("{} quizzes", quizzes.len());
    Ok(())
}
