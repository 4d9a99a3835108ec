use anyhow::Result;
use clap::Args;
use gantry_gateway::GatewayClient;
use tracing::trace;

use super::options::gateway::GatewayOptions;
use crate::config::Configuration;

#[derive(Debug, Args)]
#[command(about = "Print the ABI of the contract deployed on the channel.")]
pub struct AbiArgs {
    #[command(flatten)]
    pub gateway: GatewayOptions,
}

impl AbiArgs {
    pub async fn run(self, config: &Configuration) -> Result<()> {
        trace!(args = ?self);

        let client = self.gateway.client(config)?;
        let channel = self.gateway.channel(config)?;

        let abi = client.channel_abi(channel).await?;
        println!("{}", serde_json::to_string_pretty(&abi)?);
        Ok(())
    }
}
