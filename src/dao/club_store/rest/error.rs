//! Error types shared by the hosted REST storage implementation.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`RestDaoError`] failures.
pub type RestResult<T> = Result<T, RestDaoError>;

/// Failures that can occur while talking to the hosted REST API.
#[derive(Debug, Error)]
pub enum RestDaoError {
    /// Required environment variable is missing.
    #[error("missing REST store environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed (invalid TLS setup, bad header value, etc).
    #[error("failed to build REST client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The API key cannot be sent as an HTTP header.
    #[error("REST API key contains characters not allowed in headers")]
    InvalidApiKey,
    /// A request to a table endpoint could not be sent.
    #[error("failed to send REST request to `{table}`")]
    RequestSend {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The API returned an unexpected status code.
    #[error("unexpected REST response status {status} for `{table}`")]
    RequestStatus {
        table: &'static str,
        status: StatusCode,
    },
    /// Response payload could not be decoded into rows.
    #[error("failed to decode REST response for `{table}`")]
    DecodeResponse {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl From<RestDaoError> for StorageError {
    fn from(err: RestDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
