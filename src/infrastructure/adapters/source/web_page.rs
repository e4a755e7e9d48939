//! 网页加载

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::html::html_to_text;
use crate::application::ports::{SourceError, SourceLoaderPort};

pub struct WebPageLoader {
    client: Client,
}

impl WebPageLoader {
    pub fn new(timeout_secs: u64) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceLoaderPort for WebPageLoader {
    async fn load(&self, source: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::NetworkError(format!("HTTP {}: {}", status, source)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        let text = html_to_text(&html);
        tracing::debug!(url = %source, html_len = html.len(), text_len = text.len(), "Fetched web page");

        if text.is_empty() {
            return Err(SourceError::Empty(source.to_string()));
        }
        Ok(text)
    }
}
