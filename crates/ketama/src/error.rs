//! Error types for the ketama library.

use thiserror::Error;

/// Result type alias for the ketama library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by ring construction and lookup.
///
/// Both variants are recoverable: the caller may retry with a refreshed
/// server list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The server list was empty, its total weight was zero, or the ring
    /// being queried has no points.
    #[error("no valid server definitions found")]
    NoServers,
    /// A server entry could not be turned into ring-generation input.
    #[error("malformed server definition: {0}")]
    MalformedServer(String),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedServer(msg.into())
    }
}
