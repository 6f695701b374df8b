//! Connection settings and signer credentials.
//!
//! `ConnectionConfig` identifies the remote node and the engine account.
//! It is always passed in explicitly; nothing is read from the process
//! environment.

use core::fmt;

use ed25519_dalek::SigningKey;
use serde::Deserialize;

use crate::error::TransportError;

/// Key type prefix used by the host chain's text key format.
const ED25519_PREFIX: &str = "ed25519:";

/// How to reach the engine on the host chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host network identifier (`local`, `testnet`, ...).
    pub network: String,
    /// JSON-RPC endpoint URL.
    pub endpoint: String,
    /// Account the engine contract is deployed to.
    pub contract_id: String,
    /// Account that signs host transactions.
    pub signer_id: String,
    /// HTTP request timeout. Applied by the transport, never retried.
    pub request_timeout_ms: u64,
    /// Host gas attached to each engine method call.
    pub call_gas: u64,
}

impl ConnectionConfig {
    /// A node running on the local machine with the engine on `evm.node0`.
    pub fn local() -> Self {
        Self {
            network: "local".into(),
            endpoint: "http://127.0.0.1:3030/".into(),
            contract_id: "evm.node0".into(),
            signer_id: "evm.node0".into(),
            ..Self::default()
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            network: String::new(),
            endpoint: String::new(),
            contract_id: String::new(),
            signer_id: String::new(),
            request_timeout_ms: 30_000,
            call_gas: 300_000_000_000_000, // 300 Tgas
        }
    }
}

/// Ed25519 key of the signer account.
#[derive(Clone)]
pub struct SignerKey {
    signing_key: SigningKey,
}

impl SignerKey {
    /// Wrap an existing signing key.
    pub fn new(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    /// Build from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(SigningKey::from_bytes(&seed))
    }

    /// Parse the host chain's `ed25519:<base58>` secret key text.
    ///
    /// Accepts either the 64-byte keypair encoding (secret followed by
    /// public key) or a bare 32-byte secret. For the 64-byte form the
    /// embedded public key must match the secret.
    pub fn parse(text: &str) -> Result<Self, TransportError> {
        let encoded = text
            .strip_prefix(ED25519_PREFIX)
            .ok_or_else(|| TransportError::InvalidKey("missing ed25519: prefix".into()))?;
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| TransportError::InvalidKey(e.to_string()))?;

        let seed: [u8; 32] = match bytes.len() {
            32 | 64 => bytes[..32]
                .try_into()
                .map_err(|_| TransportError::InvalidKey("bad seed".into()))?,
            n => {
                return Err(TransportError::InvalidKey(format!(
                    "expected 32 or 64 key bytes, got {n}"
                )))
            }
        };
        let key = Self::from_seed(seed);
        if bytes.len() == 64 && bytes[32..] != key.public_key_bytes()[..] {
            return Err(TransportError::InvalidKey(
                "public half does not match secret".into(),
            ));
        }
        Ok(key)
    }

    /// Raw public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Public key in `ed25519:<base58>` form, as the RPC expects it.
    pub fn public_key_text(&self) -> String {
        format!(
            "{}{}",
            ED25519_PREFIX,
            bs58::encode(self.public_key_bytes()).into_string()
        )
    }

    /// Borrow the signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerKey")
            .field("public_key", &self.public_key_text())
            .finish_non_exhaustive()
    }
}
