//! Error types for cloudflare-ddns.

use thiserror::Error;

/// Result type alias for cloudflare-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// A remote call failed: unreachable service, non-2xx status, or a
    /// response envelope that could not be understood.
    #[error("Transport error ({context}): {message}")]
    Transport { context: String, message: String },

    /// The address echo service answered with something that is not an IPv4 literal.
    #[error("Invalid address response: {0}")]
    Format(String),

    /// No `A` record in the zone carries the target name.
    #[error("No A record named {name} in zone {zone}")]
    RecordNotFound { zone: String, name: String },

    /// More than one `A` record carries the target name.
    #[error("{count} A records named {name} in zone {zone}, refusing to pick one")]
    AmbiguousRecord {
        zone: String,
        name: String,
        count: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DdnsError {
    /// Build a transport error for the named remote operation.
    pub fn transport(context: impl Into<String>, message: impl ToString) -> Self {
        DdnsError::Transport {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for DdnsError {
    fn from(e: toml::ser::Error) -> Self {
        DdnsError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Serialization(e.to_string())
    }
}
