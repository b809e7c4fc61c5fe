//! Rust declaration builders for generated model types.
//!
//! These describe themselves as [`CodeFragment`](coremodel_codegen::builder::CodeFragment)s
//! and are rendered through a `CodeBuilder`.

mod alias;
mod enums;
mod structs;

pub use alias::TypeAlias;
pub use enums::{Enum, Variant};
pub use structs::{Field, Struct};
