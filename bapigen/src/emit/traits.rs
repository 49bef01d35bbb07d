//! Emitter interface definitions.

use std::path::PathBuf;

use crate::{data::entity::Entity, error::Result};

/// Emitter interface trait.
///
/// Implementations turn one generated entity into an artifact on disk.
pub trait EntityEmitter {
    /// Emits `entity`.
    ///
    /// # Returns
    ///
    /// The path of the written artifact.
    fn emit(&self, entity: &Entity) -> Result<PathBuf>;

    /// Returns the name of the emitter.
    fn get_name(&self) -> &'static str;
}
