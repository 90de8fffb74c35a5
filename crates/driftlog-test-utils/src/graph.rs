use async_trait::async_trait;
use driftlog_graph::{CodeEntity, Embedder, GraphError, SemanticIndexer};
use parking_lot::Mutex;

/// Embedder returning a fixed vector and recording its inputs.
#[derive(Debug, Default)]
pub struct StubEmbedder {
    vector: Vec<f32>,
    inputs: Mutex<Vec<String>>,
}

impl StubEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GraphError> {
        self.inputs.lock().push(text.to_string());
        Ok(self.vector.clone())
    }
}

/// Indexer that keeps entities in memory.
#[derive(Debug, Default)]
pub struct RecordingIndexer {
    entities: Mutex<Vec<CodeEntity>>,
    removed: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl RecordingIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexer whose calls all fail with a database error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn entities(&self) -> Vec<CodeEntity> {
        self.entities.lock().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }

    fn check(&self) -> Result<(), GraphError> {
        match &self.failure {
            Some(message) => Err(GraphError::Database {
                code: "Test.Failure".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SemanticIndexer for RecordingIndexer {
    async fn index_entity(&self, entity: &CodeEntity) -> Result<(), GraphError> {
        self.check()?;
        self.entities.lock().push(entity.clone());
        Ok(())
    }

    async fn remove_entity(&self, name: &str) -> Result<u64, GraphError> {
        self.check()?;
        let mut entities = self.entities.lock();
        let before = entities.len();
        entities.retain(|entity| entity.name != name);
        self.removed.lock().push(name.to_string());
        Ok((before - entities.len()) as u64)
    }
}
