//! Engine client: lifecycle tracking plus deploy, call and view requests.
//!
//! The `EngineClient` struct is the main entry point. It owns a transport
//! and the engine's [`EngineState`], and refuses any request whose
//! lifecycle precondition is not met before touching the network.
//!
//! Lifecycle: `install` → `initialize` (which probes `get_version`) →
//! deploys and calls.

use tracing::{debug, info, instrument, warn};

use enginelink_primitives::codec::{
    decode_token_address, decode_view_result, encode_args, DeployErc20TokenArgs,
    FunctionCallArgs, ViewCallArgs,
};
use enginelink_primitives::{
    decode_submit_result, Address, CallPayload, EngineState, SubmitResult,
};
use enginelink_rpc::RpcTransport;

use crate::config::{ClientConfig, EngineInitConfig};
use crate::error::ClientError;

// ── Engine method names ──

const METHOD_NEW: &str = "new";
const METHOD_GET_VERSION: &str = "get_version";
const METHOD_DEPLOY_CODE: &str = "deploy_code";
const METHOD_DEPLOY_ERC20: &str = "deploy_erc20_token";
const METHOD_CALL: &str = "call";
const METHOD_VIEW: &str = "view";

/// Host-side client for one embedded engine account.
pub struct EngineClient<T: RpcTransport> {
    transport: T,
    config: ClientConfig,
    state: EngineState,
    version: Option<String>,
}

impl<T: RpcTransport> EngineClient<T> {
    /// Create a client. The engine is assumed `Uninstalled` until this
    /// client installs it.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            transport,
            config,
            state: EngineState::Uninstalled,
            version: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Engine version reported by the last successful readiness probe.
    pub fn reported_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn require(&self, required: EngineState) -> Result<(), ClientError> {
        if self.state == required {
            Ok(())
        } else {
            Err(ClientError::EngineNotReady {
                required,
                actual: self.state,
            })
        }
    }

    fn require_at_least(&self, required: EngineState) -> Result<(), ClientError> {
        if self.state >= required {
            Ok(())
        } else {
            Err(ClientError::EngineNotReady {
                required,
                actual: self.state,
            })
        }
    }

    // ── Lifecycle ──

    /// Deploy the engine runtime image to the engine account.
    ///
    /// Installing over an existing engine overwrites its resident state.
    /// On failure the tracked state is left unchanged.
    #[instrument(skip(self, bytecode), fields(len = bytecode.len()))]
    pub async fn install(&mut self, bytecode: &[u8]) -> Result<(), ClientError> {
        if self.state != EngineState::Uninstalled {
            warn!(
                state = %self.state,
                contract = %self.config.connection.contract_id,
                "reinstalling engine, resident state will be overwritten"
            );
        }
        self.transport.deploy_contract(bytecode).await?;
        self.state = EngineState::Installed;
        self.version = None;
        info!(contract = %self.config.connection.contract_id, "engine installed");
        Ok(())
    }

    /// Set up the engine's global tables and confirm it answers.
    ///
    /// Valid only from `Installed`: the engine accepts `new` once per
    /// install. If the readiness probe fails the client stays
    /// `Initialized`; retry with [`Self::ensure_ready`].
    #[instrument(skip(self, init), fields(chain_id = init.chain_id))]
    pub async fn initialize(&mut self, init: &EngineInitConfig) -> Result<(), ClientError> {
        self.require(EngineState::Installed)?;

        let args = init.to_args(&self.config.connection.signer_id);
        self.transport
            .function_call(METHOD_NEW, &encode_args(&args))
            .await?;
        self.state = EngineState::Initialized;
        debug!(owner = %args.owner_id, "engine initialized");

        self.ensure_ready().await
    }

    /// Run the readiness probe and move to `Ready`.
    ///
    /// A no-op when already `Ready`.
    pub async fn ensure_ready(&mut self) -> Result<(), ClientError> {
        if self.state.is_ready() {
            return Ok(());
        }
        self.require(EngineState::Initialized)?;

        let version = self.query_version().await?;
        info!(%version, "engine ready");
        self.version = Some(version);
        self.state = EngineState::Ready;
        Ok(())
    }

    /// Ask the engine for its version string.
    pub async fn version(&self) -> Result<String, ClientError> {
        self.require_at_least(EngineState::Initialized)?;
        self.query_version().await
    }

    async fn query_version(&self) -> Result<String, ClientError> {
        let raw = self.transport.view_function(METHOD_GET_VERSION, &[]).await?;
        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    // ── Deployment ──

    /// Deploy EVM creation code and return the new contract's address.
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub async fn deploy_code(&self, data: &[u8]) -> Result<Address, ClientError> {
        self.require(EngineState::Ready)?;

        let raw = self.transport.function_call(METHOD_DEPLOY_CODE, data).await?;
        let outcome = decode_submit_result(&raw)?;
        if !outcome.status {
            warn!(gas_used = outcome.gas_used, "contract deployment reverted");
            return Err(ClientError::DeployReverted(outcome));
        }

        let address = Address::from_slice(&outcome.result)?;
        info!(%address, gas_used = outcome.gas_used, "contract deployed");
        Ok(address)
    }

    /// Deploy the bridged ERC-20 for a host-chain token and return the raw
    /// engine response. See [`extract_token_address`].
    #[instrument(skip(self))]
    pub async fn deploy_erc20_token(&self, source_id: &str) -> Result<Vec<u8>, ClientError> {
        self.require(EngineState::Ready)?;

        let args = DeployErc20TokenArgs {
            nep141: source_id.to_string(),
        };
        let raw = self
            .transport
            .function_call(METHOD_DEPLOY_ERC20, &encode_args(&args))
            .await?;
        debug!(len = raw.len(), "token deployment response");
        Ok(raw)
    }

    // ── Calls ──

    /// Execute a state-changing call and return the raw engine response.
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub async fn call(&self, target: Address, data: &[u8]) -> Result<Vec<u8>, ClientError> {
        self.require(EngineState::Ready)?;

        let args = FunctionCallArgs {
            contract: target.into_bytes(),
            input: data.to_vec(),
        };
        Ok(self
            .transport
            .function_call(METHOD_CALL, &encode_args(&args))
            .await?)
    }

    /// Execute a payload and decode the outcome. A revert is returned as
    /// a result with `status == false`.
    pub async fn submit(&self, payload: &CallPayload) -> Result<SubmitResult, ClientError> {
        let raw = self.call(payload.to(), payload.data()).await?;
        let outcome = decode_submit_result(&raw)?;
        debug!(
            status = outcome.status,
            gas_used = outcome.gas_used,
            result = %outcome.result_hex(),
            "call executed"
        );
        Ok(outcome)
    }

    /// Evaluate a payload read-only, without a signed transaction.
    #[instrument(skip(self, payload), fields(to = %payload.to()))]
    pub async fn view(&self, payload: &CallPayload) -> Result<SubmitResult, ClientError> {
        self.require(EngineState::Ready)?;

        let args = ViewCallArgs {
            sender: self.config.view_origin.into_bytes(),
            address: payload.to().into_bytes(),
            amount: [0u8; 32],
            input: payload.data().to_vec(),
        };
        let raw = self
            .transport
            .view_function(METHOD_VIEW, &encode_args(&args))
            .await?;
        Ok(decode_view_result(&raw)?)
    }
}

/// Read the token address out of a `deploy_erc20_token` response.
pub fn extract_token_address(raw: &[u8]) -> Result<Address, ClientError> {
    Ok(decode_token_address(raw)?)
}
