//! Language-specific abstractions.
//!
//! - [`LanguageCodegen`] - Per-lineage generator for one target language
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`GeneratedArtifact`] - Outcome of writing one artifact

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::{GeneratedArtifact, LanguageCodegen};
