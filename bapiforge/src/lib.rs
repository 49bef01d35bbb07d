//! # bapiforge
//!
//! Generates entities for remote callable functions (BAPIs) and keeps the
//! project's session configuration in sync with them.
//!
//! ## Features
//!
//! - **Entity Generation**: Turns a parameter schema into root and structure entities via [`bapigen`]
//! - **Session Reconciliation**: Adds, replaces or updates named session configurations
//! - **Connection Properties**: Flat property store with a JCo connection view
//!
//! ## Modules
//!
//! - [`ctx`] - Application context and the generation workflow
//! - [`properties`] - Connection properties store
//! - [`session`] - Session document and reconciler
//! - [`utils`] - Common utilities and helper functions
//!
//! ## Example
//!
//! ```rust,no_run
//! use bapiforge::ctx::{AppContext, GenerateOptions};
//!
//! let ctx = AppContext::new(".");
//! let report = ctx
//!     .generate(&GenerateOptions {
//!         schema: "flight.toml".into(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! println!("{:?}", report.outcome);
//! ```

/// Application context and the generation workflow.
pub mod ctx;

/// Connection properties store.
pub mod properties;

/// Session configuration document and reconciler.
pub mod session;

/// Common utilities and helper functions.
pub mod utils;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub use bapigen;
