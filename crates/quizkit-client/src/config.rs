//! Client configuration loading.
//!
//! The base origin is injected at construction; nothing in this crate is
//! process-wide mutable state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Base origin of the quiz service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_BASE_URL`, `QUIZKIT_TIMEOUT_SECS`.
pub fn load_config() -> Result<QuizkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("QUIZKIT_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(secs) = std::env::var("QUIZKIT_TIMEOUT_SECS") {
        config.timeout_secs = secs
            .parse()
            .context("QUIZKIT_TIMEOUT_SECS must be an integer")?;
    }

    config.base_url = resolve_env_vars(&config.base_url);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZKIT_TEST_VAR", "localhost");
        assert_eq!(resolve_env_vars("${_QUIZKIT_TEST_VAR}"), "localhost");
        assert_eq!(
            resolve_env_vars("http://${_QUIZKIT_TEST_VAR}:8001"),
            "http://localhost:8001"
        );
        std::env::remove_var("_QUIZKIT_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizkitConfig::default();
        assert_eq!(config.base_url, "http://localhost:8001");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
base_url = "http://quiz.internal:9000"
timeout_secs = 10
"#;
        let config: QuizkitConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "http://quiz.internal:9000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: QuizkitConfig = toml::from_str(r#"base_url = "http://host:1""#).unwrap();
        assert_eq!(config.base_url, "http://host:1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizkit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizkit.toml");
        std::fs::write(&path, r#"base_url = "http://explicit:8001""#).unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.base_url, "http://explicit:8001");
    }
}
