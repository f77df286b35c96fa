/// Core error types for Encore
use thiserror::Error;

/// Result type alias using `EncoreError`
pub type Result<T> = std::result::Result<T, EncoreError>;

/// Core error type for Encore
#[derive(Error, Debug)]
pub enum EncoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Catalog file is malformed or inconsistent
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Catalog file parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Database errors (for store implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl EncoreError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for EncoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
