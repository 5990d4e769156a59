//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for results that surface at the crate boundary.
pub trait ResultExt<T, E> {
    /// Convert the error into an [`ErrorEnvelope`] and attach one metadata entry.
    fn with_context(self, key: &str, value: impl Into<String>) -> Result<T>
    where
        E: Into<ErrorEnvelope>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_context(self, key: &str, value: impl Into<String>) -> Result<T>
    where
        E: Into<ErrorEnvelope>,
    {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}
