use anyhow::Result;
use clap::{Args, Subcommand};
use gantry_gateway::GatewayClient;
use tracing::trace;

use super::options::gateway::GatewayOptions;
use crate::config::Configuration;

#[derive(Debug, Args)]
#[command(about = "Interact with the block endpoints of a gateway node.")]
pub struct BlockArgs {
    #[command(subcommand)]
    pub command: BlockCommand,

    #[command(flatten)]
    pub gateway: GatewayOptions,
}

#[derive(Debug, Subcommand)]
pub enum BlockCommand {
    #[command(about = "Print the current block height of the channel.")]
    Height,
    #[command(about = "Look up a block by hash or height.")]
    Lookup {
        #[arg(long = "block-id", value_name = "HASH_OR_HEIGHT")]
        block_id: String,
    },
    #[command(about = "List blocks starting at a given height.")]
    List {
        #[arg(long, help = "Starting block height.")]
        height: u64,
        #[arg(long, default_value_t = 1, help = "Number of blocks to list.")]
        number: u32,
    },
}

impl BlockArgs {
    pub async fn run(self, config: &Configuration) -> Result<()> {
        trace!(args = ?self);

        let client = self.gateway.client(config)?;
        let channel = self.gateway.channel(config)?;

        let output = match self.command {
            BlockCommand::Height => {
                serde_json::to_string_pretty(&client.block_height(channel).await?)?
            }
            BlockCommand::Lookup { block_id } => {
                serde_json::to_string_pretty(&client.block_lookup(channel, &block_id).await?)?
            }
            BlockCommand::List { height, number } => {
                serde_json::to_string_pretty(&client.block_list(channel, height, number).await?)?
            }
        };

        println!("{output}");
        Ok(())
    }
}
