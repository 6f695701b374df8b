//! Transport trait: how the engine client reaches the engine account.
//!
//! Each method is one single-flight round trip to the remote node. The
//! trait works with raw bytes: argument encoding and response decoding
//! belong to the caller.

use async_trait::async_trait;

use crate::error::TransportError;

/// Host-chain access to the account that hosts the engine.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Deploy a runtime image to the engine account.
    ///
    /// Replaces whatever code the account held before.
    async fn deploy_contract(&self, code: &[u8]) -> Result<(), TransportError>;

    /// Call a state-changing method on the engine account with a signed
    /// host transaction. Returns the method's raw return value.
    async fn function_call(&self, method: &str, args: &[u8]) -> Result<Vec<u8>, TransportError>;

    /// Call a read-only method on the engine account. No transaction is
    /// signed or broadcast.
    async fn view_function(&self, method: &str, args: &[u8]) -> Result<Vec<u8>, TransportError>;
}
