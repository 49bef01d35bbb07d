use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors raised while turning a parameter schema into entities.
///
/// Every variant aborts the current generation; no partial entity set is
/// returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("parameter `{path}`: unsupported value type `{value_type}`")]
    UnsupportedValueType { path: String, value_type: String },

    #[error("parameter `{path}`: local name `{local_name}` does not yield an entity name")]
    InvalidName { path: String, local_name: String },

    #[error("root entity name must not be empty")]
    EmptyEntityName,

    #[error("structure `{name}` derived from `{path}` conflicts with an earlier definition")]
    StructureConflict { name: String, path: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize entity `{entity}`: {message}")]
    Serialize { entity: String, message: String },
}
