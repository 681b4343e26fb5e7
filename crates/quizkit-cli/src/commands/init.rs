//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url at your quiz service");
    println!("  2. Run: quizkit topics");
    println!("  3. Run: quizkit play --quiz <quiz-id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

# Base origin of the quiz service. ${VAR} references resolve from the
# environment; QUIZKIT_BASE_URL overrides this value entirely.
base_url = "http://localhost:8001"

# Per-request timeout in seconds.
timeout_secs = 30
"#;
