use thiserror::Error;

/// Rejected per-chat setting updates. The chat's state is never mutated
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("invalid temperature '{0}': expected a number between 0 and 2")]
    InvalidTemperature(String),

    #[error("invalid max tokens '{0}': expected a positive integer")]
    InvalidMaxTokens(String),
}

/// Errors from the chat-platform transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(String),

    #[error("api error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors from loading startup configuration. The only fatal class.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}
