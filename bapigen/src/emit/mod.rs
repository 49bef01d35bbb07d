//! Output seam for generated entities.
//!
//! Rendering entities into source text belongs to an external emitter; this
//! module only fixes the interface and ships a definition file writer.

pub mod definition;
pub mod traits;

pub use definition::{DefinitionEmitter, DefinitionFormat};
