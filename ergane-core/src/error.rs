//! Error types for Ergane operations

/// Result type for Ergane operations
pub type Result<T> = std::result::Result<T, ErganeError>;

/// Error types for the Ergane toolkit
#[derive(Debug, thiserror::Error)]
pub enum ErganeError {
    /// A handler needed a parameter the bag did not supply in usable form
    #[error("missing or invalid '{0}' parameter")]
    Parameter(String),

    /// The argument payload itself was malformed
    #[error("invalid arguments: {0}")]
    Arguments(String),

    /// Routing failed at a discriminator key
    #[error("{0}")]
    Dispatch(#[from] crate::router::DispatchError),

    /// The routing tree was assembled incorrectly
    #[error("invalid routing tree: {0}")]
    Tree(#[from] crate::router::TreeError),

    /// Tool construction failed outside the routing tree
    #[error("construction error: {0}")]
    Construction(String),

    /// Registry operation failed
    #[error("registry error: {0}")]
    Registry(#[from] crate::tool::RegistryError),

    /// Editor backend operation failed
    #[error("editor error: {0}")]
    Editor(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for ErganeError {
    fn from(s: String) -> Self {
        ErganeError::Other(s)
    }
}

impl From<&str> for ErganeError {
    fn from(s: &str) -> Self {
        ErganeError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for ErganeError {
    fn from(err: anyhow::Error) -> Self {
        ErganeError::Other(err.to_string())
    }
}
