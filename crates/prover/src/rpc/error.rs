//! RPC-specific error types.

use alloy_transport::TransportError;
use thiserror::Error;

/// RPC-specific error type.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Transport error from alloy.
    #[error("transport error: {0}")]
    Transport(String),

    /// Header not found.
    #[error("header not found: {0}")]
    HeaderNotFound(String),

    /// Invalid response from RPC.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;
