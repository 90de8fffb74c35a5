use thiserror::Error;

/// Errors from the embedding endpoint or the graph database.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Transport failure or undecodable response.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    /// Error reported by the database inside a successful response.
    #[error("database error {code}: {message}")]
    Database { code: String, message: String },
    /// The embedding endpoint returned nothing usable.
    #[error("embedding error: {0}")]
    Embedding(String),
}
