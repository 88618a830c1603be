use thiserror::Error;

/// Main error type for ensqr operations
#[derive(Error, Debug)]
pub enum EnsQrError {
    /// Name cannot be turned into a node identifier
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// JSON-RPC error object returned by the node
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Contract call data could not be decoded
    #[error("ABI decode error: {0}")]
    Abi(String),

    /// The registry has no resolver set for the node
    #[error("No resolver set for {0}")]
    NoResolver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload does not fit in a QR code
    #[error("QR encoding failed: {0}")]
    QrCode(String),

    /// A newer request replaced this one before it finished
    #[error("Resolution of {0} was superseded by a newer request")]
    Superseded(String),

    /// Resolution task panicked
    #[error("Resolution task failed: {0}")]
    Task(String),
}

/// Result type alias for ensqr operations
pub type Result<T> = std::result::Result<T, EnsQrError>;

impl From<url::ParseError> for EnsQrError {
    fn from(err: url::ParseError) -> Self {
        EnsQrError::Config(format!("Invalid URL: {}", err))
    }
}

impl From<hex::FromHexError> for EnsQrError {
    fn from(err: hex::FromHexError) -> Self {
        EnsQrError::Abi(format!("Invalid hex: {}", err))
    }
}
