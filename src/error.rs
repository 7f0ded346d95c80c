//! Error types for the playlist pipeline

/// Result type alias for playlist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the catalog, the source list and configuration loading.
///
/// Malformed playlist lines are never errors; the parser skips them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No catalog item with this id
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Every configured source failed during one refresh
    #[error("All {count} playlist sources failed")]
    AllSourcesFailed { count: usize },

    /// A source URL was rejected by the source list
    #[error("Invalid source URL {0}: {1}")]
    InvalidSource(String, String),

    /// Index does not point at a configured source
    #[error("No source at index {0}")]
    SourceIndexOutOfRange(usize),

    /// The built-in default source cannot be removed
    #[error("The default source cannot be removed")]
    DefaultSourcePinned,

    /// Invalid configuration value or file
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a not-found error for an id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
