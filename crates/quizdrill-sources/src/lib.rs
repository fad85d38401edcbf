//! quizdrill-sources: where bank text comes from.
//!
//! Implementations of the `TextSource` trait (filesystem, HTTP, and an
//! in-memory mock for tests), plus the configuration that picks between
//! them.

pub mod config;
pub mod fs;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config, load_config_from, QuizdrillConfig, SourceConfig};
