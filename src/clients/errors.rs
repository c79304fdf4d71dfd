use thiserror::Error;

/// Failures surfaced by the proxy. Each variant carries the originating message.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog answered, but with nothing to return.
    #[error("{0}")]
    NotFound(String),

    /// Network failure, timeout, non-success status or an unusable body.
    #[error("{0}")]
    UpstreamError(String),

    /// Missing or unparsable settings at startup.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::UpstreamError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::UpstreamError(err.to_string())
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
