//! The `quizkit play` command — drive a full session interactively.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use quizkit_core::flow::run_session;
use quizkit_core::model::SessionQuestion;
use quizkit_core::traits::{AnswerSelector, QuizService};

/// Reads option selections from stdin, reprompting on invalid input.
struct StdinSelector;

#[async_trait]
impl AnswerSelector for StdinSelector {
    async fn select(&self, question: &SessionQuestion) -> Result<u32> {
        println!("\n{}. {}", question.order_index + 1, question.question);
        for option in &question.options {
            println!("  [{}] {}", option.num, option.text);
        }
        let valid: Vec<u32> = question.options.iter().map(|o| o.num).collect();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let (read, line) = tokio::task::spawn_blocking(|| {
                let mut line = String::new();
                std::io::stdin().read_line(&mut line).map(|n| (n, line))
            })
            .await??;
            if read == 0 {
                anyhow::bail!("input closed before the session was finished");
            }

            match line.trim().parse::<u32>() {
                Ok(choice) if valid.contains(&choice) => return Ok(choice),
                _ => println!("Pick one of the listed option numbers."),
            }
        }
    }
}

pub async fn execute(
    config: Option<PathBuf>,
    base_url: Option<String>,
    quiz_id: String,
) -> Result<()> {
    let client = super::build_client(config.as_deref(), base_url.as_deref())?;

    let details = client.quiz_details(&quiz_id).await?;
    println!(
        "Starting \"{}\" — {} questions",
        details.quiz.name, details.quiz.question_count
    );

    let summary = run_session(&client, &quiz_id, &StdinSelector).await?;

    super::results::print_summary(&summary);
    println!("Review answers with: quizkit results --session {}", summary.id);
    Ok(())
}
