//! Error types for landgen.
//!
//! All footprint-generation errors are recoverable and generation-scoped:
//! a failure aborts one footprint, never the process. Non-fatal advisories
//! do not appear here at all; they go through the caller's warning sink.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for footprint generation and rendering.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing parameters, building the footprint
/// model, or rendering it to a target format.
#[derive(Debug, Error)]
pub enum Error {
    /// A design rule was looked up that the rules dictionary does not hold.
    #[error("Required rule '{name}' not found")]
    RuleNotFound {
        /// Name of the missing rule.
        name: String,
    },

    /// A symbolic or designator drill name could not be resolved.
    #[error("Drill '{name}' not found")]
    DrillNotFound {
        /// The designator or symbolic name that failed to resolve.
        name: String,
    },

    /// Malformed parameter token stream.
    #[error("Parameter syntax error: {message}")]
    Syntax {
        /// Description of what was found instead.
        message: String,
    },

    /// A keyword declared as required by the generator was not supplied.
    #[error("Required keyword '{keyword}' missing")]
    RequiredKeyword {
        /// The missing keyword.
        keyword: String,
    },

    /// A keyword was supplied that the generator does not declare.
    #[error("Invalid keyword '{keyword}' present")]
    InvalidKeyword {
        /// The undeclared keyword.
        keyword: String,
    },

    /// A parameter value is outside its valid range or of the wrong kind.
    #[error("Parameter value error: {message}")]
    InvalidValue {
        /// Description of the bad value.
        message: String,
    },

    /// A primitive was constructed with impossible geometry.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of the geometric defect.
        message: String,
    },

    /// Two pins in one footprint carry the same pin number.
    #[error("Duplicate pin number {number} in footprint")]
    DuplicatePin {
        /// The repeated pin number.
        number: u32,
    },

    /// The selected backend has no representation for a primitive.
    #[error("Cannot render {primitive} in {backend}")]
    CannotRender {
        /// Name of the primitive kind.
        primitive: String,
        /// Name of the target format.
        backend: String,
    },

    /// No generator registered under the requested name.
    #[error("Unknown generator: {name}")]
    UnknownGenerator {
        /// The requested generator name.
        name: String,
    },

    /// No backend registered under the requested format name.
    #[error("Unknown output format: {name}")]
    UnknownBackend {
        /// The requested format name.
        name: String,
    },

    /// A rules or rack file failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a rule-not-found error.
    pub fn rule_not_found(name: impl Into<String>) -> Self {
        Self::RuleNotFound { name: name.into() }
    }

    /// Creates a drill-not-found error.
    pub fn drill_not_found(name: impl Into<String>) -> Self {
        Self::DrillNotFound { name: name.into() }
    }

    /// Creates a parameter syntax error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    /// Creates a parameter value error.
    pub fn value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Creates an invalid-geometry error.
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Creates a cannot-render error naming the primitive and backend.
    pub fn cannot_render(primitive: impl Into<String>, backend: impl Into<String>) -> Self {
        Self::CannotRender {
            primitive: primitive.into(),
            backend: backend.into(),
        }
    }
}

/// Errors that can occur while loading rules/rack configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration contents failed validation.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}
