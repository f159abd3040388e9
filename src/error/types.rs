//! Routing layer error types

use thiserror::Error;

/// Errors raised by the routing layer itself.
///
/// Only construction can fail here: a missing field, an empty pool, an
/// unknown driver name. Once an adapter exists, the only failures it
/// surfaces are [`BackendError`]s from the backend it forwarded to.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl RouterError {
    /// Construction-time configuration failure
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Failures produced by a backend while serving a forwarded operation.
///
/// The routers never construct, wrap, retry, or translate these; whatever
/// the selected backend raised propagates to the caller unchanged.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = RouterError::configuration("pool list is empty");
        assert_eq!(err.to_string(), "configuration error: pool list is empty");
    }

    #[test]
    fn test_backend_error_passes_through_router_error() {
        let backend_err = BackendError::Unavailable("replica down".to_string());
        let err: RouterError = backend_err.into();
        // Transparent: the original message survives unchanged
        assert_eq!(err.to_string(), "backend unavailable: replica down");
    }

    #[test]
    fn test_backend_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = BackendError::from(io_err);
        assert!(matches!(err, BackendError::Io(_)));
    }
}
