//! One-shot channel contract operations: pause, resume and delete.

use anyhow::Result;
use clap::Args;
use gantry_gateway::{Signer as _, Transaction};
use gantry_utils::{Submitter, TransactionBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

use super::options::gateway::GatewayOptions;
use super::options::signer::SignerOptions;
use super::options::transaction::TransactionOptions;
use crate::config::Configuration;

#[derive(Debug, Args)]
#[command(about = "Pause the contract on the channel.")]
pub struct PauseArgs {
    #[command(flatten)]
    pub common: ContractOptions,
}

#[derive(Debug, Args)]
#[command(about = "Resume a paused contract on the channel.")]
pub struct ResumeArgs {
    #[command(flatten)]
    pub common: ContractOptions,
}

#[derive(Debug, Args)]
#[command(about = "Delete the contract on the channel, clearing its state.")]
pub struct DeleteArgs {
    #[command(flatten)]
    pub common: ContractOptions,
}

#[derive(Debug, Args)]
pub struct ContractOptions {
    #[command(flatten)]
    pub gateway: GatewayOptions,

    #[command(flatten)]
    pub signer: SignerOptions,

    #[command(flatten)]
    pub transaction: TransactionOptions,
}

impl PauseArgs {
    pub async fn run(self, config: &Configuration, cancellation: CancellationToken) -> Result<()> {
        self.common.submit(config, cancellation, |builder| builder.pause(true)).await
    }
}

impl ResumeArgs {
    pub async fn run(self, config: &Configuration, cancellation: CancellationToken) -> Result<()> {
        self.common.submit(config, cancellation, |builder| builder.pause(false)).await
    }
}

impl DeleteArgs {
    pub async fn run(self, config: &Configuration, cancellation: CancellationToken) -> Result<()> {
        self.common.submit(config, cancellation, TransactionBuilder::delete).await
    }
}

impl ContractOptions {
    async fn submit(
        self,
        config: &Configuration,
        cancellation: CancellationToken,
        build: impl FnOnce(TransactionBuilder) -> Transaction,
    ) -> Result<()> {
        trace!(args = ?self);

        let client = self.gateway.client(config)?;
        let channel = self.gateway.channel(config)?;
        let signer = self.signer.signer(config)?;

        let submitter = Submitter::new(&client, &signer, self.transaction.txn_config())
            .with_cancellation(cancellation);

        let tx = build(submitter.builder(signer.public_key(), channel).await?);

        let (id, receipt) = submitter.submit(tx).await?;
        info!(%id, "Transaction executed.");
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        Ok(())
    }
}
