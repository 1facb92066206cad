//! Error types for effconf-core

/// Result type for effconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file-based source could not be read or parsed
    #[error(transparent)]
    Fs(#[from] effconf_fs::Error),

    /// A `${key}` reference names a key that is not configured and has no default
    #[error("Unresolved reference ${{{key}}} in the value of {property}")]
    UnresolvedReference { key: String, property: String },

    /// Expanding a value led back to a key already being expanded
    #[error("Reference cycle while expanding {chain}")]
    ExpansionCycle { chain: String },

    /// A `${` without its closing `}`
    #[error("Unterminated expression in the value of {property}: {value}")]
    UnterminatedExpression { property: String, value: String },
}
