use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_log::{AsTrace, LogTracer};
use tracing_subscriber::FmtSubscriber;

use crate::commands::Commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Command line client for gantry contract channels.")]
pub struct GantryArgs {
    #[arg(long)]
    #[arg(global = true)]
    #[arg(env = "GANTRY_CONFIG")]
    #[arg(help = "Override path to the gantry configuration file.")]
    pub config: Option<PathBuf>,

    #[clap(help = "Logging verbosity.")]
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    pub command: Commands,
}

impl GantryArgs {
    pub fn init_logging(
        &self,
        clap_verbosity: &clap_verbosity_flag::Verbosity,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let verbose = clap_verbosity.log_level_filter().as_trace() >= LevelFilter::DEBUG;

        let default_log_filter: &str = if verbose {
            "none,hyper=off,gantry=trace,gantry_gateway=trace,gantry_utils=trace,\
             gantry_manifest=trace"
        } else {
            "none,hyper=off,gantry=info,gantry_utils=info,gantry_manifest=info"
        };

        LogTracer::init()?;

        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_filter)),
            )
            .finish();

        Ok(tracing::subscriber::set_global_default(subscriber)?)
    }
}
