//! The deployment executor drives deployment manifests against the gateway.

use gantry_gateway::{AccountId, GatewayClient, Signer};
use gantry_utils::{Submitter, TxnConfig};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::ExecutionError;
use crate::ops;
use crate::types::{Manifest, ManifestKind};

/// Executes deployment manifests: deploy the contract named by the channel,
/// then submit each follow-up transaction in manifest order, reconciling
/// every receipt before the next step.
#[derive(Debug)]
pub struct DeploymentExecutor<'a, C, S>
where
    C: GatewayClient,
    S: Signer,
{
    submitter: Submitter<'a, C, S>,
    sender: AccountId,
}

impl<'a, C, S> DeploymentExecutor<'a, C, S>
where
    C: GatewayClient,
    S: Signer,
{
    pub fn new(client: &'a C, signer: &'a S, txn_config: TxnConfig) -> Self {
        Self { sender: signer.public_key(), submitter: Submitter::new(client, signer, txn_config) }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.submitter = self.submitter.with_cancellation(cancellation);
        self
    }

    /// Executes every manifest of type `deployment`, in order. Other manifest
    /// types are skipped. The first failed step aborts the run.
    pub async fn execute(&self, manifests: &[Manifest]) -> Result<(), ExecutionError<S::Error>> {
        for manifest in manifests {
            if manifest.kind != ManifestKind::Deployment {
                continue;
            }
            self.execute_manifest(manifest).await?;
        }
        Ok(())
    }

    async fn execute_manifest(&self, manifest: &Manifest) -> Result<(), ExecutionError<S::Error>> {
        let deploy = manifest.deploy.as_ref().ok_or_else(|| ExecutionError::MissingDeploy {
            channel: manifest.channel.id.clone(),
        })?;

        let (channel, owner) = ops::resolve_ids(&manifest.channel)?;
        info!(name = %deploy.name, %channel, "Deploying contract.");

        ops::deploy_contract(
            &self.submitter,
            self.sender,
            channel,
            owner,
            &manifest.channel,
            &deploy.name,
        )
        .await?;

        for entry in &deploy.transactions {
            ops::submit_call(&self.submitter, self.sender, channel, &entry.tx).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use gantry_gateway::LocalSigner;
    use gantry_utils::{ReceiptWaitingError, TransactionError};

    use super::*;
    use crate::test_support::{
        channel_fixture, deployment_manifest, ok_receipt, ScriptedGateway, SubmitPlan, SEED_HEX,
    };

    fn executor<'a>(
        gateway: &'a ScriptedGateway,
        signer: &'a LocalSigner,
    ) -> DeploymentExecutor<'a, ScriptedGateway, LocalSigner> {
        DeploymentExecutor::new(gateway, signer, TxnConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn submits_deploy_then_calls_in_order() {
        let (_dir, channel) = channel_fixture();
        let manifest = deployment_manifest(channel, &["setup", "seed"]);
        let gateway = ScriptedGateway::ok();
        let signer = LocalSigner::from_hex(SEED_HEX).unwrap();

        executor(&gateway, &signer).execute(&[manifest]).await.unwrap();

        assert_eq!(gateway.submitted(), ["deploy", "setup", "seed"]);
    }

    #[tokio::test(start_paused = true)]
    async fn aborts_when_reconciliation_fails() {
        let (_dir, channel) = channel_fixture();
        let manifest = deployment_manifest(channel, &["setup", "seed"]);
        // Deploy resolves inline; the first call's receipt never materializes.
        let gateway = ScriptedGateway::new(vec![
            SubmitPlan::Receipt(ok_receipt()),
            SubmitPlan::Unresolved,
        ]);
        let signer = LocalSigner::from_hex(SEED_HEX).unwrap();

        let err = executor(&gateway, &signer).execute(&[manifest]).await.unwrap_err();

        assert_matches!(
            err,
            ExecutionError::Call {
                ref function,
                source: TransactionError::Waiting(ReceiptWaitingError::Exhausted { .. }),
            } if function == "setup"
        );
        // The second call is never submitted.
        assert_eq!(gateway.submitted(), ["deploy", "setup"]);
    }

    #[tokio::test(start_paused = true)]
    async fn skips_manifests_of_other_types() {
        let (_dir, channel) = channel_fixture();
        let mut manifest = deployment_manifest(channel, &[]);
        manifest.kind = ManifestKind::Test;
        let gateway = ScriptedGateway::ok();
        let signer = LocalSigner::from_hex(SEED_HEX).unwrap();

        executor(&gateway, &signer).execute(&[manifest]).await.unwrap();

        assert!(gateway.submitted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_deploy_block_is_an_error() {
        let (_dir, channel) = channel_fixture();
        let mut manifest = deployment_manifest(channel, &[]);
        manifest.deploy = None;
        let gateway = ScriptedGateway::ok();
        let signer = LocalSigner::from_hex(SEED_HEX).unwrap();

        let err = executor(&gateway, &signer).execute(&[manifest]).await.unwrap_err();

        assert_matches!(err, ExecutionError::MissingDeploy { .. });
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_channel_id_is_an_error() {
        let (_dir, mut channel) = channel_fixture();
        channel.id = "not-hex".to_string();
        let manifest = deployment_manifest(channel, &[]);
        let gateway = ScriptedGateway::ok();
        let signer = LocalSigner::from_hex(SEED_HEX).unwrap();

        let err = executor(&gateway, &signer).execute(&[manifest]).await.unwrap_err();

        assert_matches!(err, ExecutionError::InvalidIdentifier { field: "channel", .. });
        assert!(gateway.submitted().is_empty());
    }
}
