use std::fmt;

/// Error type for tracker, registry and configuration operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Configuration-related errors.
    ConfigError(String),
    /// Input validation errors.
    ValidationError(String),
    /// Chain id not present in the registry.
    UnknownChain(u64),
    /// Route between two chains is not supported.
    UnsupportedRoute(String),
    /// A state update broke a transfer invariant.
    InvalidState(String),
    /// Receipt / log decoding errors.
    DecodeError(String),
    /// Amount parsing or conversion errors.
    InvalidAmount(String),
    /// Menu selection errors.
    SelectionError(String),
    /// Serialization/deserialization errors.
    SerializationError(String),
    /// IO errors.
    IoError(String),
    /// Generic errors (legacy).
    Other(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TrackerError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            TrackerError::UnknownChain(id) => write!(f, "Unknown chain: {}", id),
            TrackerError::UnsupportedRoute(msg) => write!(f, "Unsupported route: {}", msg),
            TrackerError::InvalidState(msg) => write!(f, "Invalid transfer state: {}", msg),
            TrackerError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            TrackerError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            TrackerError::SelectionError(msg) => write!(f, "Selection error: {}", msg),
            TrackerError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            TrackerError::IoError(msg) => write!(f, "IO error: {}", msg),
            TrackerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {}

impl TrackerError {
    /// Whether the error was caused by bad caller input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TrackerError::ValidationError(_)
                | TrackerError::UnknownChain(_)
                | TrackerError::UnsupportedRoute(_)
                | TrackerError::InvalidAmount(_)
                | TrackerError::SelectionError(_)
        )
    }
}

impl From<anyhow::Error> for TrackerError {
    fn from(err: anyhow::Error) -> Self {
        TrackerError::Other(err.to_string())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for TrackerError {
    fn from(err: toml::de::Error) -> Self {
        TrackerError::ConfigError(err.to_string())
    }
}
