use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseBumpError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseBumpError>;

impl ReleaseBumpError {
    /// Create a validation error for an invalid action/flag combination
    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Validation(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Version(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Manifest(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Tag(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseBumpError::Config(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReleaseBumpError::Validation(_))
    }
}

impl From<toml::de::Error> for ReleaseBumpError {
    fn from(err: toml::de::Error) -> Self {
        ReleaseBumpError::Config(err.to_string())
    }
}
