//! Core utilities and types for the coremodel generator.
//!
//! This crate provides the artifact writing and naming helpers shared by
//! every generator in the workspace.

mod file;
mod utils;

// File operations
pub use file::{Artifact, ArtifactKind, WriteResult, ensure_dir};
// String utilities
pub use utils::{slash_path, to_pascal_case, to_snake_case, upper_first};
