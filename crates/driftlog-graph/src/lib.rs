//! Semantic indexing of code entities into a graph database.
//!
//! The indexer embeds an entity's purpose and code, then stores it as a
//! `CodeEntity` node. Nothing in the record store or context path depends on
//! this crate.

mod embedding;
mod entity;
mod error;
mod indexer;
mod neo4j;

pub use embedding::{Embedder, OpenAiEmbedder};
pub use entity::CodeEntity;
pub use error::GraphError;
pub use indexer::SemanticIndexer;
pub use neo4j::{Neo4jIndexer, create_entity_request, delete_entity_request};
