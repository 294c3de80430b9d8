use thiserror::Error;

/// Result type for MHUB operations
pub type Result<T> = std::result::Result<T, MhubError>;

/// Errors that can occur when talking to an MHUB matrix
#[derive(Error, Debug)]
pub enum MhubError {
    /// The device could not be reached or the response never arrived
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid protocol envelope
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The device answered with an explicit error code instead of data
    #[error("device reported error code {0}")]
    DeviceReported(String),

    /// The envelope carried neither a data object nor an error code
    #[error("response contained no data object")]
    EmptyPayload,

    /// The configured base URL could not be parsed or joined
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MhubError {
    /// Whether this error means the device is unreachable, as opposed to a
    /// reachable device returning something unusable.
    pub fn is_offline(&self) -> bool {
        matches!(self, MhubError::Transport(_))
    }
}
