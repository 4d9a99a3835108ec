use anyhow::Result;
use clap::Args;
use gantry_gateway::{GatewayClient, TransactionId};
use tracing::trace;

use super::options::gateway::GatewayOptions;
use crate::config::Configuration;

#[derive(Debug, Args)]
#[command(about = "Look up the receipt of a transaction.")]
pub struct ReceiptArgs {
    #[arg(long = "tx-id", value_name = "HEX")]
    #[arg(help = "The transaction id to look up.")]
    pub tx_id: TransactionId,

    #[command(flatten)]
    pub gateway: GatewayOptions,
}

impl ReceiptArgs {
    pub async fn run(self, config: &Configuration) -> Result<()> {
        trace!(args = ?self);

        let client = self.gateway.client(config)?;
        let channel = self.gateway.channel(config)?;

        let receipt = client.receipt_lookup(channel, self.tx_id).await?;
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        Ok(())
    }
}
