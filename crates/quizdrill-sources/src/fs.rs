//! Filesystem bank source.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use quizdrill_core::error::SourceError;
use quizdrill_core::traits::TextSource;

/// Reads bank files relative to a root directory.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TextSource for FsSource {
    fn name(&self) -> &str {
        "fs"
    }

    #[instrument(skip(self))]
    async fn fetch_text(&self, source_id: &str) -> Result<String, SourceError> {
        let path = self.root.join(source_id);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::NotFound(source_id.to_string())
            } else {
                SourceError::Io {
                    id: source_id.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}
