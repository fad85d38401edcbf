//! Source configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdrill_core::traits::TextSource;

use crate::fs::FsSource;
use crate::http::HttpSource;

/// Configuration for the bank source transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Fs {
        #[serde(default = "default_root")]
        root: PathBuf,
    },
    Http {
        base_url: String,
    },
}

fn default_root() -> PathBuf {
    PathBuf::from("banks")
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Fs {
            root: default_root(),
        }
    }
}

/// Top-level quizdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdrillConfig {
    /// Where bank text comes from.
    #[serde(default)]
    pub source: SourceConfig,
    /// Source ids to load. The first one is mandatory, the rest optional.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    /// How many questions one session asks for.
    #[serde(default = "default_session_size")]
    pub session_size: usize,
    /// Whether to shuffle option order per question.
    #[serde(default)]
    pub shuffle_options: bool,
    /// Output directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_sources() -> Vec<String> {
    vec!["questions.csv".to_string()]
}
fn default_session_size() -> usize {
    30
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizdrill-results")
}

impl Default for QuizdrillConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            sources: default_sources(),
            session_size: default_session_size(),
            shuffle_options: false,
            output_dir: default_output_dir(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdrill.toml` in the current directory
/// 2. `~/.config/quizdrill/config.toml`
pub fn load_config() -> Result<QuizdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
///
/// An explicit path that does not exist is an error; falling back to
/// defaults is only for the no-config-anywhere case.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizdrillConfig::default()),
    }
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdrill"))
}

/// Create a source instance from its configuration.
pub fn create_source(config: &SourceConfig) -> Box<dyn TextSource> {
    match config {
        SourceConfig::Fs { root } => Box::new(FsSource::new(root.clone())),
        SourceConfig::Http { base_url } => Box::new(HttpSource::new(base_url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizdrillConfig::default();
        assert_eq!(config.sources, vec!["questions.csv"]);
        assert_eq!(config.session_size, 30);
        assert!(!config.shuffle_options);
        assert!(matches!(config.source, SourceConfig::Fs { .. }));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
sources = ["math.csv", "history.csv"]
session_size = 10
shuffle_options = true
output_dir = "./results"

[source]
type = "fs"
root = "my-banks"
"#;
        let config: QuizdrillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources, vec!["math.csv", "history.csv"]);
        assert_eq!(config.session_size, 10);
        assert!(config.shuffle_options);
        assert_eq!(config.output_dir, PathBuf::from("./results"));
        let SourceConfig::Fs { root } = config.source else {
            panic!("expected an fs source");
        };
        assert_eq!(root, PathBuf::from("my-banks"));
    }

    #[test]
    fn parse_minimal_config_fills_defaults() {
        let config: QuizdrillConfig = toml::from_str("session_size = 5\n").unwrap();
        assert_eq!(config.session_size, 5);
        assert_eq!(config.sources, vec!["questions.csv"]);
        assert!(matches!(config.source, SourceConfig::Fs { .. }));
    }

    #[test]
    fn parse_http_source() {
        let toml_str = r#"
[source]
type = "http"
base_url = "https://banks.example.com"
"#;
        let config: QuizdrillConfig = toml::from_str(toml_str).unwrap();
        let SourceConfig::Http { base_url } = config.source else {
            panic!("expected an http source");
        };
        assert_eq!(base_url, "https://banks.example.com");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn loads_from_an_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizdrill.toml");
        std::fs::write(&path, "session_size = 3\nsources = [\"a.csv\"]\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.session_size, 3);
        assert_eq!(config.sources, vec!["a.csv"]);
    }
}
