use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by club stores regardless of the backend behind them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached or refused the request.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Backend answered with rows that do not fit the domain model.
    #[error("corrupt record in `{table}`: {message}")]
    Corrupt { table: &'static str, message: String },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a corruption error for a row read from `table`.
    pub fn corrupt(table: &'static str, message: impl Into<String>) -> Self {
        StorageError::Corrupt {
            table,
            message: message.into(),
        }
    }
}
