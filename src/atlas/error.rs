use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON document")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object keyed by id")]
    NotAnObject,
    #[error("invalid entry `{id}`")]
    Entry {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name} is not a JSON file")]
    ContentType { name: String },
}
