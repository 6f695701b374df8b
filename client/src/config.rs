//! Client configuration.

use serde::Deserialize;

use enginelink_primitives::codec::{u128_to_be_word, NewCallArgs};
use enginelink_primitives::Address;
use enginelink_rpc::ConnectionConfig;

/// Chain id the engine reports to contracts unless told otherwise.
pub const DEFAULT_CHAIN_ID: u64 = 1_313_161_556;

/// Configuration for an [`EngineClient`](crate::EngineClient).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Remote node, engine account and signer.
    pub connection: ConnectionConfig,

    /// Sender address used for read-only `view` calls.
    /// Default: the zero address.
    pub view_origin: Address,
}

impl ClientConfig {
    /// Configuration for a given connection with default settings elsewhere.
    pub fn with_connection(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }
}

/// Arguments for the engine's one-time initialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineInitConfig {
    /// Chain id exposed to EVM contracts.
    pub chain_id: u64,

    /// Account allowed to administer the engine.
    /// Default: the signer account.
    pub owner_id: Option<String>,

    /// Account of the bridge prover.
    /// Default: the signer account.
    pub bridge_prover_id: Option<String>,

    /// Blocks an upgrade must be staged before it can be applied.
    pub upgrade_delay_blocks: u64,
}

impl Default for EngineInitConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            owner_id: None,
            bridge_prover_id: None,
            upgrade_delay_blocks: 1,
        }
    }
}

impl EngineInitConfig {
    /// Resolve defaults against the signer account and build the wire args.
    pub fn to_args(&self, signer_id: &str) -> NewCallArgs {
        NewCallArgs {
            chain_id: u128_to_be_word(u128::from(self.chain_id)),
            owner_id: self.owner_id.clone().unwrap_or_else(|| signer_id.to_string()),
            bridge_prover_id: self
                .bridge_prover_id
                .clone()
                .unwrap_or_else(|| signer_id.to_string()),
            upgrade_delay_blocks: self.upgrade_delay_blocks,
        }
    }
}
