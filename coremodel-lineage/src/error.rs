use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::SchemaVersion;

/// Result type for lineage operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{path}: missing {file}")]
    #[diagnostic(
        code(coremodel::missing_file),
        help("every lineage directory must contain a {file}")
    )]
    MissingFile { path: String, file: String },

    #[error("{filename} is not valid UTF-8")]
    #[diagnostic(code(coremodel::encoding))]
    Encoding { filename: String },

    #[error("failed to parse {filename}: {message}")]
    #[diagnostic(code(coremodel::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        filename: String,
        message: String,
    },

    #[error("{filename}: {message}")]
    #[diagnostic(code(coremodel::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        filename: String,
        message: String,
    },

    #[error("invalid lineage name '{name}'")]
    #[diagnostic(
        code(coremodel::invalid_name),
        help("{reason}. Lineage names are lowercase letters and digits, starting with a letter.")
    )]
    InvalidName { name: String, reason: String },

    #[error("lineage '{lineage}' has no schema version {version}")]
    #[diagnostic(code(coremodel::version_not_found))]
    VersionNotFound {
        lineage: String,
        version: SchemaVersion,
    },

    #[error("coremodel '{name}' is registered more than once")]
    #[diagnostic(code(coremodel::duplicate_model))]
    DuplicateModel { name: String },
}

impl Error {
    /// Create an invalid lineage name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidName {
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Create a missing version error
    pub fn version_not_found(lineage: impl Into<String>, version: SchemaVersion) -> Box<Self> {
        Box::new(Error::VersionNotFound {
            lineage: lineage.into(),
            version,
        })
    }
}
