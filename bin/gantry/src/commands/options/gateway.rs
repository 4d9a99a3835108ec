use anyhow::{anyhow, Result};
use clap::Args;
use gantry_gateway::{ChannelId, HttpGatewayClient};
use tracing::trace;
use url::Url;

use crate::config::Configuration;

pub const GANTRY_ADDRESS_ENV_VAR: &str = "GANTRY_ADDRESS";
pub const GANTRY_CHANNEL_ID_ENV_VAR: &str = "GANTRY_CHANNEL_ID";

const DEFAULT_ADDRESS: &str = "http://localhost:6299";

#[derive(Debug, Args, Clone)]
#[command(next_help_heading = "Gateway options")]
pub struct GatewayOptions {
    #[arg(long, env = GANTRY_ADDRESS_ENV_VAR)]
    #[arg(value_name = "URL")]
    #[arg(help = "The gateway node address.")]
    #[arg(global = true)]
    pub address: Option<Url>,

    #[arg(long, env = GANTRY_CHANNEL_ID_ENV_VAR)]
    #[arg(value_name = "HEX")]
    #[arg(help = "The target channel id. Defaults to the configured active channel.")]
    #[arg(global = true)]
    pub channel_id: Option<String>,
}

impl GatewayOptions {
    pub fn client(&self, config: &Configuration) -> Result<HttpGatewayClient> {
        let url = self.url(config)?;
        trace!(%url, "Creating gateway client.");
        Ok(HttpGatewayClient::new(url))
    }

    // The env var is handled by `clap`, so only the flag and the configured
    // active channel are consulted here.
    pub fn url(&self, config: &Configuration) -> Result<Url> {
        if let Some(url) = &self.address {
            trace!(%url, "Using gateway address from command line.");
            Ok(url.clone())
        } else if let Ok(channel) = config.active_channel() {
            trace!(url = %channel.channel_url, "Using gateway address of the active channel.");
            Ok(channel.channel_url.clone())
        } else {
            trace!("Using default gateway address: {DEFAULT_ADDRESS}.");
            Ok(Url::parse(DEFAULT_ADDRESS).expect("valid default address"))
        }
    }

    pub fn channel(&self, config: &Configuration) -> Result<ChannelId> {
        let raw = if let Some(id) = &self.channel_id {
            id.as_str()
        } else {
            &config
                .active_channel()
                .map_err(|_| anyhow!("no channel id given and no active channel configured"))?
                .channel_id
        };

        ChannelId::from_hex(raw).map_err(|err| anyhow!("invalid channel id `{raw}`: {err}"))
    }
}
