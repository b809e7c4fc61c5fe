//! Core operations.
//!
//! The business logic of the generator, separated from argument parsing and
//! output rendering.

pub mod generate;

pub use generate::generate;
