//! Install → initialize → deploy sequencing.
//!
//! Each step runs only if the previous one succeeded. The first failure is
//! returned unchanged and nothing is rolled back, so the client's state is
//! whatever the last successful step left it in.

use serde::Deserialize;
use tracing::info;

use enginelink_primitives::DeploymentRecord;
use enginelink_rpc::RpcTransport;

use crate::client::{extract_token_address, EngineClient};
use crate::config::EngineInitConfig;
use crate::error::ClientError;

/// Which lifecycle steps a deployment runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploymentPlan {
    /// Initialize the engine after installing it. When false the engine
    /// must already be `Ready`, otherwise the deploy step is refused.
    pub initialize: bool,

    /// Arguments for the initialization step.
    pub init: EngineInitConfig,
}

impl Default for DeploymentPlan {
    fn default() -> Self {
        Self {
            initialize: true,
            init: EngineInitConfig::default(),
        }
    }
}

/// Drives an [`EngineClient`] through a full deployment.
pub struct DeploymentOrchestrator<'a, T: RpcTransport> {
    client: &'a mut EngineClient<T>,
}

impl<'a, T: RpcTransport> DeploymentOrchestrator<'a, T> {
    pub fn new(client: &'a mut EngineClient<T>) -> Self {
        Self { client }
    }

    async fn prepare(&mut self, runtime: &[u8], plan: &DeploymentPlan) -> Result<(), ClientError> {
        self.client.install(runtime).await?;
        if plan.initialize {
            self.client.initialize(&plan.init).await?;
        }
        Ok(())
    }

    /// Install the engine, optionally initialize it, then deploy the
    /// bridged token for `source_id`.
    pub async fn deploy_token(
        &mut self,
        runtime: &[u8],
        plan: &DeploymentPlan,
        source_id: &str,
    ) -> Result<DeploymentRecord, ClientError> {
        self.prepare(runtime, plan).await?;

        let raw = self.client.deploy_erc20_token(source_id).await?;
        let deployed_address = extract_token_address(&raw)?;
        info!(source_id, address = %deployed_address, "token deployed");

        Ok(DeploymentRecord {
            source_id: source_id.to_string(),
            deployed_address,
        })
    }

    /// Install the engine, optionally initialize it, then deploy contract
    /// creation code. The record is tagged with the caller's `label`.
    pub async fn deploy_contract(
        &mut self,
        runtime: &[u8],
        plan: &DeploymentPlan,
        label: &str,
        deploy_data: &[u8],
    ) -> Result<DeploymentRecord, ClientError> {
        self.prepare(runtime, plan).await?;

        let deployed_address = self.client.deploy_code(deploy_data).await?;
        Ok(DeploymentRecord {
            source_id: label.to_string(),
            deployed_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enginelink_primitives::EngineState;
    use enginelink_rpc::{MockTransport, TransportError};

    use crate::config::ClientConfig;

    #[tokio::test]
    async fn test_skipped_initialize_stops_before_deploy() {
        let mock = MockTransport::new();
        let mut client = EngineClient::new(ClientConfig::default(), mock.clone());
        let plan = DeploymentPlan {
            initialize: false,
            ..DeploymentPlan::default()
        };

        let err = DeploymentOrchestrator::new(&mut client)
            .deploy_token(b"engine", &plan, "token.node0")
            .await
            .unwrap_err();
        assert!(err.is_not_ready());
        assert_eq!(client.state(), EngineState::Installed);
        assert!(mock.methods().is_empty());
    }

    #[tokio::test]
    async fn test_failed_initialize_propagates() {
        let mock = MockTransport::new();
        mock.fail("new", TransportError::ExecutionFailure("already initialized".into()));
        let mut client = EngineClient::new(ClientConfig::default(), mock.clone());

        let err = DeploymentOrchestrator::new(&mut client)
            .deploy_token(b"engine", &DeploymentPlan::default(), "token.node0")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::TransportFailure(TransportError::ExecutionFailure(_))
        ));
        assert_eq!(client.state(), EngineState::Installed);
        assert_eq!(mock.methods(), vec!["new"]);
    }
}
