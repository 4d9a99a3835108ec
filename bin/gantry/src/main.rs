#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::process::exit;

use anyhow::Result;
use args::GantryArgs;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, trace};

mod args;
mod commands;
mod config;

#[tokio::main]
async fn main() {
    let args = GantryArgs::parse();
    let _ = args.init_logging(&args.verbose);

    if let Err(err) = cli_main(args).await {
        error!("{err:?}");
        exit(1);
    }
}

async fn cli_main(args: GantryArgs) -> Result<()> {
    let config = config::Configuration::load(args.config.as_deref())?;
    trace!(channels = config.channels.len(), "Configuration loaded.");

    // A single token shared by every in-flight receipt poll, so Ctrl-C stops
    // the current wait instead of leaving the process hanging on backoff.
    let cancellation = CancellationToken::new();
    let ctrlc = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrlc.cancel();
        }
    });

    commands::run(args.command, &config, cancellation).await
}
