use anyhow::{anyhow, Context, Result};
use clap::Args;
use gantry_gateway::LocalSigner;

use crate::config::Configuration;

pub const GANTRY_PRIVATE_KEY_ENV_VAR: &str = "GANTRY_PRIVATE_KEY";

#[derive(Debug, Args, Clone)]
#[command(next_help_heading = "Signer options")]
pub struct SignerOptions {
    #[arg(long, env = GANTRY_PRIVATE_KEY_ENV_VAR)]
    #[arg(value_name = "HEX")]
    #[arg(help = "The Ed25519 private key used to sign transactions. Defaults to the configured \
                  user key.")]
    #[arg(global = true)]
    pub private_key: Option<String>,
}

impl SignerOptions {
    pub fn signer(&self, config: &Configuration) -> Result<LocalSigner> {
        let key = if let Some(key) = &self.private_key {
            key
        } else {
            &config
                .user
                .as_ref()
                .ok_or_else(|| anyhow!("no private key given and no user configured"))?
                .private_key
        };

        LocalSigner::from_hex(key).context("invalid private key")
    }
}
