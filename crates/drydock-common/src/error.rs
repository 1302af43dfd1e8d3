//! Error contract shared by every container client operation.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by a container client.
///
/// Variants are listed in precedence order: a server error masks every
/// other failure an operation could have reported.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server rejected the operation.
    ///
    /// Carries no detail about the request that was rejected.
    #[error("Internal server error")]
    #[diagnostic(
        code(drydock::server_error),
        help("Failure mode is enabled on this runtime; disable it to restore normal behavior")
    )]
    ServerError,

    /// A container with the same ID is already registered.
    #[error("Container already running: {id}")]
    #[diagnostic(code(drydock::container::already_exists))]
    AlreadyExists {
        /// The colliding container ID.
        id: String,
    },

    /// No container with the requested ID is registered.
    #[error("No such container: {id}")]
    #[diagnostic(code(drydock::container::not_found))]
    NotFound {
        /// The container ID that was requested.
        id: String,
    },
}

impl ClientError {
    /// Returns true if this is the undetailed server failure.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError)
    }

    /// Returns true if the container already existed.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns true if the container was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The container ID the error refers to, if any.
    #[must_use]
    pub fn container_id(&self) -> Option<&str> {
        match self {
            Self::ServerError => None,
            Self::AlreadyExists { id } | Self::NotFound { id } => Some(id),
        }
    }
}
