//! Call and result types exchanged with the embedded engine.
//!
//! These are plain value types with no shared mutable state. The wire
//! encoding of [`SubmitResult`] lives in [`crate::codec`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Address;

/// An unsigned call descriptor: target contract plus encoded call data.
///
/// Fields are private so a payload cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallPayload {
    to: Address,
    data: Vec<u8>,
}

impl CallPayload {
    /// Create a payload.
    pub fn new(to: Address, data: Vec<u8>) -> Self {
        Self { to, data }
    }

    /// Target contract.
    pub fn to(&self) -> Address {
        self.to
    }

    /// Encoded call data (selector followed by ABI-encoded arguments).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Split into parts.
    pub fn into_parts(self) -> (Address, Vec<u8>) {
        (self.to, self.data)
    }
}

/// Outcome of one engine-executed call.
///
/// `status` reports execution success inside the engine. A `false` status
/// is a normal, successfully decoded outcome: `result` then holds the
/// revert payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Execution succeeded.
    pub status: bool,
    /// Gas consumed by the call.
    pub gas_used: u64,
    /// Return data, or revert data when `status` is false.
    pub result: Vec<u8>,
}

impl SubmitResult {
    /// Lowercase hex of `result`, without prefix.
    pub fn result_hex(&self) -> String {
        hex::encode(&self.result)
    }

    /// Returns true if the call reverted.
    pub fn is_revert(&self) -> bool {
        !self.status
    }
}

/// A contract or token deployed into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Host-side identifier the deployment is bound to (e.g. a token account).
    pub source_id: String,
    /// Address of the deployment inside the engine.
    pub deployed_address: Address,
}

/// Lifecycle of the engine as tracked by the client.
///
/// Transitions only move forward, except that a repeated install resets
/// any state back to `Installed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum EngineState {
    /// No runtime image has been installed by this client.
    #[default]
    Uninstalled,
    /// Runtime image installed; global tables not yet set up.
    Installed,
    /// Initialization call succeeded; readiness not yet confirmed.
    Initialized,
    /// Engine answered the readiness probe and accepts deploys and calls.
    Ready,
}

impl EngineState {
    /// Returns true if deploy and call requests may be issued.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninstalled => write!(f, "uninstalled"),
            Self::Installed => write!(f, "installed"),
            Self::Initialized => write!(f, "initialized"),
            Self::Ready => write!(f, "ready"),
        }
    }
}
