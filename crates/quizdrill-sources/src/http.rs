//! HTTP bank source.

use async_trait::async_trait;
use tracing::instrument;

use quizdrill_core::error::SourceError;
use quizdrill_core::traits::TextSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches bank files from a base URL, one GET per source id.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl TextSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn fetch_text(&self, source_id: &str) -> Result<String, SourceError> {
        let url = format!("{}/{}", self.base_url, source_id);
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else if e.is_connect() {
                SourceError::Network(format!("cannot reach {}", self.base_url))
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(source_id.to_string()));
        }
        if status >= 400 {
            return Err(SourceError::Http {
                id: source_id.to_string(),
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))
    }
}
