//! Versioned schema lineages.
//!
//! A lineage is an ordered history of schemas for one logical model, stored
//! as `lineage.toml`. This crate loads and validates lineage files, renders
//! schemas as portable OpenAPI documents, and defines the runtime contract
//! ([`framework`]) that generated coremodel code builds on.
//!
//! ```ignore
//! use coremodel_lineage::{Library, MemoryFs, load, schema_for};
//!
//! let fs = MemoryFs::single("lineage.toml", std::fs::read("pkg/coremodel/panel/lineage.toml")?);
//! let lin = load("pkg/coremodel/panel", &fs, Library::shared())?;
//! let schema = schema_for(&lin, lin.latest_version())?;
//! let doc = schema.to_openapi(lin.name());
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod fs;
mod library;
mod lineage;
mod openapi;
mod raw;
mod types;
mod validate;
mod version;

pub mod framework;

pub use error::{Error, Result};
pub use fs::MemoryFs;
pub use library::Library;
pub use lineage::{LINEAGE_FILE, Lineage, Schema, load, schema_for};
pub use openapi::COMPONENT_REF_PREFIX;
pub use types::{Definition, Field, ObjectType, Scalar, Type};
pub use version::SchemaVersion;
