//! Session configuration document and its reconciler.
//!
//! The document lists named session configurations. Each one holds the
//! connection settings of a remote system plus the generated entity classes
//! registered to use it. [`manager::SessionManager`] is the only sanctioned
//! way to change it.
//!
//! # Document Format
//!
//! ```toml
//! [[session]]
//! name = "SM001"
//! context = "org.hibersap.execution.jco.JCoContext"
//! classes = ["com.example.hibersap.FlightDetail"]
//!
//! [session.connection.properties]
//! "jco.client.ashost" = "some.sap-system.com"
//! "jco.client.client" = "000"
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Session configuration types.
pub mod config;

/// Loading, merging and saving the session document.
pub mod manager;

pub use config::{Connection, SessionConfig, SessionDocument};
pub use manager::{MergeMode, MergeOutcome, SessionManager};

/// Errors raised by [`SessionManager`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session with this name already exists. Recoverable: override or update instead.
    #[error("session `{name}` already exists")]
    Duplicate { name: String },

    /// No session with this name exists.
    #[error("session `{name}` not found")]
    NotFound { name: String },

    /// The persisted document could not be parsed.
    #[error("malformed session document {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("unsupported session document extension: {ext:?}")]
    UnsupportedFormat { ext: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize session document: {0}")]
    Serialize(String),
}
