pub mod init;
pub mod play;
pub mod quizzes;
pub mod results;
pub mod show;
pub mod topics;

use std::path::Path;

use anyhow::Result;

use quizkit_client::{load_config_from, QuizClient};

/// Build a client from the config search path, applying the CLI override.
pub fn build_client(config: Option<&Path>, base_url: Option<&str>) -> Result<QuizClient> {
    let mut config = load_config_from(config)?;
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }
    Ok(QuizClient::from_config(&config))
}
