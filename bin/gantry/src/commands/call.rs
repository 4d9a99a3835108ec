use anyhow::Result;
use clap::Args;
use gantry_gateway::{Argument, Signer as _};
use gantry_utils::Submitter;
use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

use super::options::gateway::GatewayOptions;
use super::options::signer::SignerOptions;
use super::options::transaction::TransactionOptions;
use crate::config::Configuration;

#[derive(Debug, Args)]
#[command(about = "Call a contract function on the channel.")]
pub struct CallArgs {
    #[arg(help = "The name of the contract function to call.")]
    pub function: String,

    #[arg(short, long)]
    #[arg(value_delimiter = ',')]
    #[arg(help = "Arguments passed to the function. Comma separated values.")]
    pub args: Vec<String>,

    #[command(flatten)]
    pub gateway: GatewayOptions,

    #[command(flatten)]
    pub signer: SignerOptions,

    #[command(flatten)]
    pub transaction: TransactionOptions,
}

impl CallArgs {
    pub async fn run(
        self,
        config: &Configuration,
        cancellation: CancellationToken,
    ) -> Result<()> {
        trace!(args = ?self);

        let client = self.gateway.client(config)?;
        let channel = self.gateway.channel(config)?;
        let signer = self.signer.signer(config)?;

        let submitter = Submitter::new(&client, &signer, self.transaction.txn_config())
            .with_cancellation(cancellation);

        let args: Vec<Argument> = self.args.into_iter().map(Argument::from).collect();
        let tx = submitter.builder(signer.public_key(), channel).await?.call(self.function, args);

        let (id, receipt) = submitter.submit(tx).await?;
        info!(%id, "Transaction executed.");
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        Ok(())
    }
}
