//! JSON-RPC transport for a NEAR-style host chain.
//!
//! Views go through `query` / `call_function`. Everything that changes
//! state is a signed host transaction:
//!
//! 1. `query` / `view_access_key` for the signer's nonce and a recent block hash
//! 2. borsh-encode the `Transaction` and hash it with SHA-256
//! 3. sign the hash with the signer's Ed25519 key
//! 4. `broadcast_tx_commit` the base64 `SignedTransaction`
//! 5. read `status.SuccessValue` (base64) as the method's return value
//!
//! There is no retry. Concurrent callers sharing one signer would race
//! on the access-key nonce; callers serialize.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use borsh::BorshSerialize;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use enginelink_primitives::crypto::{hash_sha256, sign_ed25519};

use crate::error::TransportError;
use crate::traits::RpcTransport;
use crate::types::{ConnectionConfig, SignerKey};

/// Key type tag for Ed25519 in host-chain borsh encodings.
const KEY_TYPE_ED25519: u8 = 0;

// ── Host transaction wire types ──

#[derive(Debug, Clone, BorshSerialize)]
struct PublicKey {
    key_type: u8,
    data: [u8; 32],
}

#[derive(Debug, Clone, BorshSerialize)]
struct Signature {
    key_type: u8,
    data: [u8; 64],
}

#[derive(Debug, Clone, BorshSerialize)]
struct DeployContractAction {
    code: Vec<u8>,
}

#[derive(Debug, Clone, BorshSerialize)]
struct FunctionCallAction {
    method_name: String,
    args: Vec<u8>,
    gas: u64,
    deposit: u128,
}

/// Action variants in host-chain tag order. Only the ones this
/// transport sends carry data.
#[allow(dead_code)]
#[derive(Debug, Clone, BorshSerialize)]
enum Action {
    CreateAccount,
    DeployContract(DeployContractAction),
    FunctionCall(FunctionCallAction),
}

#[derive(Debug, Clone, BorshSerialize)]
struct Transaction {
    signer_id: String,
    public_key: PublicKey,
    nonce: u64,
    receiver_id: String,
    block_hash: [u8; 32],
    actions: Vec<Action>,
}

#[derive(Debug, Clone, BorshSerialize)]
struct SignedTransaction {
    transaction: Transaction,
    signature: Signature,
}

// ── JSON-RPC response shapes ──

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: Option<i64>,
    message: Option<String>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct AccessKeyView {
    nonce: u64,
    block_hash: String,
}

#[derive(Debug, Deserialize)]
struct CallFunctionView {
    #[serde(default)]
    result: Option<Vec<u8>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FinalExecutionOutcome {
    status: Value,
}

/// HTTP JSON-RPC transport that signs host transactions with [`SignerKey`].
pub struct NearRpcTransport {
    config: ConnectionConfig,
    signer: SignerKey,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl NearRpcTransport {
    /// Create a transport for `config`, signing as `signer`.
    pub fn new(config: ConnectionConfig, signer: SignerKey) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            config,
            signer,
            http,
            next_id: AtomicU64::new(1),
        })
    }

    /// The connection settings in use.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Issue one JSON-RPC request and return its `result` member.
    async fn rpc(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, endpoint = %self.config.endpoint, "rpc request");

        let response: Value = self
            .http
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.get("error") {
            let error: RpcErrorObject = serde_json::from_value(error.clone())?;
            let message = error
                .data
                .map(|d| d.to_string())
                .or(error.message)
                .unwrap_or_else(|| "unknown error".into());
            warn!(method, id, %message, "rpc returned error");
            return Err(TransportError::Rpc {
                code: error.code,
                message,
            });
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| TransportError::invalid_response(format!("{method}: missing result")))
    }

    /// Current nonce and a recent block hash for the signer's access key.
    async fn access_key(&self) -> Result<(u64, [u8; 32]), TransportError> {
        let result = self
            .rpc(
                "query",
                json!({
                    "request_type": "view_access_key",
                    "finality": "final",
                    "account_id": self.config.signer_id,
                    "public_key": self.signer.public_key_text(),
                }),
            )
            .await?;
        if let Some(error) = result.get("error").and_then(Value::as_str) {
            return Err(TransportError::rpc(error));
        }
        let view: AccessKeyView = serde_json::from_value(result)?;

        let hash = bs58::decode(&view.block_hash)
            .into_vec()
            .map_err(|e| TransportError::invalid_response(format!("block_hash: {e}")))?;
        let block_hash: [u8; 32] = hash
            .try_into()
            .map_err(|_| TransportError::invalid_response("block_hash is not 32 bytes"))?;
        Ok((view.nonce, block_hash))
    }

    /// Sign `actions` addressed to the engine account, broadcast them and
    /// wait for the final outcome.
    async fn sign_and_send(&self, actions: Vec<Action>) -> Result<Vec<u8>, TransportError> {
        let (nonce, block_hash) = self.access_key().await?;

        let transaction = Transaction {
            signer_id: self.config.signer_id.clone(),
            public_key: PublicKey {
                key_type: KEY_TYPE_ED25519,
                data: self.signer.public_key_bytes(),
            },
            nonce: nonce + 1,
            receiver_id: self.config.contract_id.clone(),
            block_hash,
            actions,
        };
        let signed = sign_transaction(transaction, &self.signer)?;
        let encoded = borsh::to_vec(&signed)
            .map_err(|e| TransportError::invalid_response(format!("encode transaction: {e}")))?;

        let result = self
            .rpc("broadcast_tx_commit", json!([BASE64.encode(encoded)]))
            .await?;
        let outcome: FinalExecutionOutcome = serde_json::from_value(result)?;
        read_success_value(&outcome.status)
    }
}

/// Hash the borsh transaction and attach the Ed25519 signature.
fn sign_transaction(
    transaction: Transaction,
    signer: &SignerKey,
) -> Result<SignedTransaction, TransportError> {
    let bytes = borsh::to_vec(&transaction)
        .map_err(|e| TransportError::invalid_response(format!("encode transaction: {e}")))?;
    let hash = hash_sha256(&bytes);
    let signature = sign_ed25519(&hash, signer.signing_key());
    Ok(SignedTransaction {
        transaction,
        signature: Signature {
            key_type: KEY_TYPE_ED25519,
            data: signature,
        },
    })
}

/// Extract the method return value from a final execution status.
fn read_success_value(status: &Value) -> Result<Vec<u8>, TransportError> {
    if let Some(value) = status.get("SuccessValue").and_then(Value::as_str) {
        return BASE64
            .decode(value)
            .map_err(|e| TransportError::invalid_response(format!("SuccessValue: {e}")));
    }
    if status.get("SuccessReceiptId").is_some() {
        return Ok(Vec::new());
    }
    if let Some(failure) = status.get("Failure") {
        return Err(TransportError::ExecutionFailure(failure.to_string()));
    }
    Err(TransportError::invalid_response(format!(
        "unexpected transaction status: {status}"
    )))
}

#[async_trait]
impl RpcTransport for NearRpcTransport {
    async fn deploy_contract(&self, code: &[u8]) -> Result<(), TransportError> {
        debug!(bytes = code.len(), account = %self.config.contract_id, "deploying runtime image");
        self.sign_and_send(vec![Action::DeployContract(DeployContractAction {
            code: code.to_vec(),
        })])
        .await
        .map(|_| ())
    }

    async fn function_call(&self, method: &str, args: &[u8]) -> Result<Vec<u8>, TransportError> {
        self.sign_and_send(vec![Action::FunctionCall(FunctionCallAction {
            method_name: method.to_string(),
            args: args.to_vec(),
            gas: self.config.call_gas,
            deposit: 0,
        })])
        .await
    }

    async fn view_function(&self, method: &str, args: &[u8]) -> Result<Vec<u8>, TransportError> {
        let result = self
            .rpc(
                "query",
                json!({
                    "request_type": "call_function",
                    "finality": "final",
                    "account_id": self.config.contract_id,
                    "method_name": method,
                    "args_base64": BASE64.encode(args),
                }),
            )
            .await?;
        let view: CallFunctionView = serde_json::from_value(result)?;
        if let Some(error) = view.error {
            return Err(TransportError::ExecutionFailure(error));
        }
        view.result
            .ok_or_else(|| TransportError::invalid_response(format!("{method}: missing view result")))
    }
}
