use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Args;
use gantry_gateway::HttpGatewayClient;
use gantry_manifest::{load_manifests, DeploymentExecutor, Manifest, ManifestKind};
use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

use super::options::gateway::GatewayOptions;
use super::options::signer::SignerOptions;
use super::options::transaction::TransactionOptions;
use crate::config::Configuration;

#[derive(Debug, Args)]
#[command(about = "Execute deployment manifests against the gateway.")]
pub struct DeployArgs {
    #[arg(long = "manifest", value_name = "PATH")]
    #[arg(env = "GANTRY_DEPLOYMENT_MANIFEST")]
    #[arg(default_value = "./gantry/deployment.yaml")]
    #[arg(help = "Path to the deployment manifest file.")]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub gateway: GatewayOptions,

    #[command(flatten)]
    pub signer: SignerOptions,

    #[command(flatten)]
    pub transaction: TransactionOptions,
}

impl DeployArgs {
    pub async fn run(
        self,
        config: &Configuration,
        cancellation: CancellationToken,
    ) -> Result<()> {
        trace!(args = ?self);

        let manifests = load_manifests(&self.manifest, ManifestKind::Deployment)?;
        ensure!(!manifests.is_empty(), "no deployment manifests in {}", self.manifest.display());

        let client = manifest_client(&self.gateway, config, &manifests)?;
        let signer = self.signer.signer(config)?;

        DeploymentExecutor::new(&client, &signer, self.transaction.txn_config())
            .with_cancellation(cancellation)
            .execute(&manifests)
            .await?;

        info!(manifests = manifests.len(), "Deployment complete.");
        Ok(())
    }
}

/// Resolves the gateway client for a manifest run. An explicit `--address`
/// wins, then the first `gateway-node` named by a manifest, then the
/// configuration.
pub(crate) fn manifest_client(
    options: &GatewayOptions,
    config: &Configuration,
    manifests: &[Manifest],
) -> Result<HttpGatewayClient> {
    if options.address.is_none() {
        if let Some(node) = manifests.iter().find_map(|manifest| manifest.gateway_node.as_ref()) {
            trace!(url = %node.address, "Using gateway address from the manifest.");
            return Ok(HttpGatewayClient::new(node.address.clone()));
        }
    }
    options.client(config)
}
