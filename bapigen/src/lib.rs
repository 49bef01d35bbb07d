//! # bapigen
//!
//! Generates annotated entity definitions from the parameter schema of a
//! remote callable function (BAPI / RFC function module).
//!
//! The parameter schema is produced elsewhere, typically by introspecting a
//! live system. `bapigen` turns it into one root entity carrying the function's
//! wire name plus one structure entity for every nested structure or table of
//! structures.
//!
//! ## Quick Start
//!
//! ```rust
//! use bapigen::data::schema::{Parameter, ParameterSchema};
//!
//! let schema = ParameterSchema::new("BAPI_FLCONN_GETDETAIL")
//!     .with_import(Parameter::scalar("FLIGHTDATE", "_flightdate", "date"))
//!     .with_export(Parameter::structure(
//!         "PRICE_INFO",
//!         "_priceInfo",
//!         vec![Parameter::scalar("CURR", "_curr", "string")],
//!     ));
//!
//! let set = bapigen::generate("FlightDetail", "hibersap", &schema).unwrap();
//! assert_eq!(set.root.fields.len(), 2);
//! assert!(set.structure("PriceInfo").is_some());
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema input, generated entity model and the structure registry
//! - [`generator`] - Schema walking and entity generation
//! - [`naming`] - Identifier conversion rules
//! - [`emit`] - Output seam for generated entities
//! - [`error`] - Error types and result definitions

#[macro_use]
extern crate log;

/// Schema input, generated entity model and the structure registry.
pub mod data;

/// Output seam for generated entities.
pub mod emit;

/// Error types and result definitions for entity generation.
pub mod error;

/// Schema walking and entity generation.
pub mod generator;

/// Identifier conversion rules.
pub mod naming;

pub use data::entity::{
    DeclaredType, Descriptor, Entity, EntityKind, FieldKind, FieldSpec, GeneratedEntitySet,
    RoleTag,
};
pub use data::schema::{Parameter, ParameterKind, ParameterSchema, ValueType};
pub use emit::traits::EntityEmitter;
pub use error::{GenerateError, Result};
pub use generator::generate;
