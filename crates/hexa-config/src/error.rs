//! Failures of the settings layer. The universe core itself never fails.

/// Errors from reading, writing, or overriding universe settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `universe.ron` exists but could not be read.
    #[error("cannot read universe settings: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings directory or file could not be written.
    #[error("cannot write universe settings: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("malformed universe settings: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("cannot encode universe settings: {0}")]
    SerializeError(#[source] ron::Error),

    /// A name did not match any tunable parameter.
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    /// A command-line override could not be interpreted.
    #[error("invalid override `{input}`: {reason}")]
    InvalidOverride { input: String, reason: String },
}
