//! Transport error types.
//!
//! Every failure to complete a round trip with the remote node ends up
//! here: connection problems, JSON-RPC errors, host-chain execution
//! failures of the engine method, and responses that cannot be read.
//! Nothing in this crate retries.

/// Error returned by [`RpcTransport`](crate::RpcTransport) methods.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request could not be sent or its body not read
    /// (connection refused, timeout, non-success status).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Rpc { code: Option<i64>, message: String },

    /// The host transaction was accepted but the engine method failed.
    #[error("engine method failed on host chain: {0}")]
    ExecutionFailure(String),

    /// The node's answer did not have the expected shape.
    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),

    /// The signer credentials could not be parsed.
    #[error("invalid signer key: {0}")]
    InvalidKey(String),
}

impl TransportError {
    /// Create an `InvalidResponse` error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an `Rpc` error without a code.
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc {
            code: None,
            message: msg.into(),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
