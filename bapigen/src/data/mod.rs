//! Schema input, generated entity model and the structure registry.
//!
//! - [`schema`] - Parameter schema delivered by the introspection side
//! - [`entity`] - Generated entities, fields and their descriptors
//! - [`registry`] - Name-keyed accumulator for nested structure entities

/// Parameter schema of one remote function.
pub mod schema;

/// Generated entity model.
pub mod entity;

/// Structure registry used during generation.
pub mod registry;

pub use entity::{Entity, GeneratedEntitySet};
pub use registry::StructureRegistry;
pub use schema::ParameterSchema;
