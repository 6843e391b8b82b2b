/// A boxed error used as the optional cause of an [`Error::InvalidArgument`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for LiqPay parameter, serialization and signing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied missing or malformed credentials or parameters.
    ///
    /// These are never retried; the input must be fixed by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    /// Create an [`Error::InvalidArgument`] without an underlying cause.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    /// Create an [`Error::InvalidArgument`] wrapping the error that caused it.
    pub fn invalid_argument_with(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::InvalidArgument {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_argument_with("Failed to serialize parameters", err)
    }
}

/// A specialized `Result` type for LiqPay operations.
pub type Result<T> = std::result::Result<T, Error>;
