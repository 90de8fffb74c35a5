use crate::entity::CodeEntity;
use crate::error::GraphError;
use async_trait::async_trait;

/// Store and remove code entities in a semantic index.
#[async_trait]
pub trait SemanticIndexer: Send + Sync {
    async fn index_entity(&self, entity: &CodeEntity) -> Result<(), GraphError>;

    /// Remove every entity with `name`; returns how many were deleted.
    async fn remove_entity(&self, name: &str) -> Result<u64, GraphError>;
}
