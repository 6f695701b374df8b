//! Client error types.

use enginelink_primitives::{AbiError, CodecError, EngineState, SubmitResult};
use enginelink_rpc::TransportError;

/// Top-level error type for the client crate.
///
/// A reverted call is not an error: `submit` returns it as a
/// [`SubmitResult`] with `status == false`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Malformed address or truncated engine response.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Call could not be encoded against the contract interface.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// A lifecycle step is missing; run it and retry.
    #[error("engine not ready: requires {required}, current state is {actual}")]
    EngineNotReady {
        required: EngineState,
        actual: EngineState,
    },

    /// The remote node could not complete the request.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// Contract creation executed but reverted, so there is no address.
    #[error("deployment reverted (gas used {}): 0x{}", .0.gas_used, .0.result_hex())]
    DeployReverted(SubmitResult),
}

impl ClientError {
    /// Returns true for lifecycle precondition failures.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::EngineNotReady { .. })
    }

    /// Returns true for transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}
