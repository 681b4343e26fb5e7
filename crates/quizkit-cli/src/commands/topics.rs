//! The `quizkit topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(config: Option<PathBuf>, base_url: Option<String>) -> Result<()> {
    let client = super::build_client(config.as_deref(), base_url.as_deref())?;
    let catalog = client.list_quizzes_and_topics().await?;

    if catalog.topics.is_empty() {
        println!("No topics. The quiz list is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic ID", "Name", "Quizzes"]);
    for topic in &catalog.topics {
        let quiz_count = catalog
            .quizzes
            .iter()
            .filter(|q| q.topic_id == topic.id)
            .count();
        table.add_row(vec![
            Cell::new(&topic.id),
            Cell::new(&topic.name),
            Cell::new(quiz_count),
        ]);
    }

    println!("{table}");
    Ok(())
}
