//! Mock bank source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizdrill_core::error::SourceError;
use quizdrill_core::traits::TextSource;

/// An in-memory source for testing loaders and the CLI without touching
/// disk or network.
pub struct MockSource {
    /// Map of source id to bank text.
    texts: HashMap<String, String>,
    /// Number of fetches made.
    call_count: AtomicU32,
    /// Last source id requested.
    last_requested: Mutex<Option<String>>,
}

impl MockSource {
    /// Create a mock serving the given id-to-text mappings.
    pub fn new(texts: HashMap<String, String>) -> Self {
        Self {
            texts,
            call_count: AtomicU32::new(0),
            last_requested: Mutex::new(None),
        }
    }

    /// Create a mock serving a single source.
    pub fn with_single(source_id: &str, text: &str) -> Self {
        let mut texts = HashMap::new();
        texts.insert(source_id.to_string(), text.to_string());
        Self::new(texts)
    }

    /// Get the number of fetches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last source id requested.
    pub fn last_requested(&self) -> Option<String> {
        self.last_requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_text(&self, source_id: &str) -> Result<String, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_requested.lock().unwrap() = Some(source_id.to_string());

        self.texts
            .get(source_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(source_id.to_string()))
    }
}
