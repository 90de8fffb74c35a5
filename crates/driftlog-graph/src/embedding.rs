//! Text embedding through an OpenAI-compatible endpoint.

use crate::error::GraphError;
use async_trait::async_trait;
use driftlog_config::EmbeddingConfig;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;

/// Turns text into a vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GraphError>;
}

/// Client for `<base_url>/embeddings`.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Build from config, reading the API key from the named env var if set.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        let embedder = Self::new(&config.base_url, &config.model);
        let Some(var) = config.api_key_env.as_deref() else {
            return embedder;
        };
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => embedder.with_api_key(key),
            _ => {
                warn!("embedding api key variable is unset (var={var})");
                embedder
            }
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GraphError> {
        let request = json!({
            "model": self.model,
            "input": text,
        });
        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: EmbeddingResponse = response.json().await?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .filter(|embedding| !embedding.is_empty())
            .ok_or_else(|| GraphError::Embedding("no embedding returned".to_string()))?;
        debug!(
            "embedded text (model={}, dims={})",
            self.model,
            embedding.len()
        );
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::OpenAiEmbedder;
    use driftlog_config::EmbeddingConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let embedder = OpenAiEmbedder::new("http://localhost:11434/v1/", "all-minilm");
        assert_eq!(embedder.endpoint(), "http://localhost:11434/v1/embeddings");
    }

    #[test]
    fn unset_key_variable_means_no_auth() {
        let config = EmbeddingConfig {
            api_key_env: Some("DRIFTLOG_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..EmbeddingConfig::default()
        };
        let embedder = OpenAiEmbedder::from_config(&config);
        assert_eq!(embedder.api_key, None);
    }
}
