//! Neo4j indexer over the HTTP transaction endpoint.

use crate::embedding::{Embedder, OpenAiEmbedder};
use crate::entity::CodeEntity;
use crate::error::GraphError;
use crate::indexer::SemanticIndexer;
use async_trait::async_trait;
use driftlog_config::GraphConfig;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

const CREATE_ENTITY: &str = "CREATE (n:CodeEntity {file: $file, type: $type, name: $name, \
code: $code, purpose: $purpose, embedding: $embedding, created: timestamp()})";
const DELETE_ENTITY: &str = "MATCH (n:CodeEntity {name: $name}) DETACH DELETE n";

/// Request body that creates one `CodeEntity` node.
pub fn create_entity_request(entity: &CodeEntity, embedding: &[f32]) -> Value {
    json!({
        "statements": [{
            "statement": CREATE_ENTITY,
            "parameters": {
                "file": entity.file_path,
                "type": entity.entity_type,
                "name": entity.name,
                "code": entity.code,
                "purpose": entity.purpose,
                "embedding": embedding,
            },
        }],
    })
}

/// Request body that deletes `CodeEntity` nodes by name, with stats.
pub fn delete_entity_request(name: &str) -> Value {
    json!({
        "statements": [{
            "statement": DELETE_ENTITY,
            "parameters": { "name": name },
            "includeStats": true,
        }],
    })
}

#[derive(Debug, Default, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Default, Deserialize)]
struct TxResult {
    #[serde(default)]
    stats: TxStats,
}

#[derive(Debug, Default, Deserialize)]
struct TxStats {
    #[serde(default)]
    nodes_deleted: u64,
}

#[derive(Debug, Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Semantic indexer backed by a Neo4j server.
#[derive(Clone)]
pub struct Neo4jIndexer {
    client: reqwest::Client,
    uri: String,
    database: String,
    user: String,
    password: String,
    embedder: Arc<dyn Embedder>,
}

impl Neo4jIndexer {
    pub fn new(config: &GraphConfig, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            client: reqwest::Client::new(),
            uri: config.uri.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
            embedder,
        }
    }

    /// Indexer using the configured embedding endpoint.
    pub fn from_config(config: &GraphConfig) -> Self {
        let embedder = Arc::new(OpenAiEmbedder::from_config(&config.embedding));
        Self::new(config, embedder)
    }

    pub fn commit_endpoint(&self) -> String {
        format!("{}/db/{}/tx/commit", self.uri, self.database)
    }

    async fn commit(&self, body: &Value) -> Result<TxResponse, GraphError> {
        let response = self
            .client
            .post(self.commit_endpoint())
            .basic_auth(&self.user, Some(&self.password))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: TxResponse = response.json().await?;
        if let Some(error) = parsed.errors.into_iter().next() {
            return Err(GraphError::Database {
                code: error.code,
                message: error.message,
            });
        }
        Ok(TxResponse {
            results: parsed.results,
            errors: Vec::new(),
        })
    }
}

#[async_trait]
impl SemanticIndexer for Neo4jIndexer {
    async fn index_entity(&self, entity: &CodeEntity) -> Result<(), GraphError> {
        let embedding = self.embedder.embed(&entity.embedding_text()).await?;
        debug!(
            "indexing entity (name={}, file={}, dims={})",
            entity.name,
            entity.file_path,
            embedding.len()
        );
        self.commit(&create_entity_request(entity, &embedding)).await?;
        info!("entity indexed (name={}, type={})", entity.name, entity.entity_type);
        Ok(())
    }

    async fn remove_entity(&self, name: &str) -> Result<u64, GraphError> {
        let response = self.commit(&delete_entity_request(name)).await?;
        let deleted = response
            .results
            .iter()
            .map(|result| result.stats.nodes_deleted)
            .sum();
        info!("entity removed (name={name}, nodes={deleted})");
        Ok(deleted)
    }
}
