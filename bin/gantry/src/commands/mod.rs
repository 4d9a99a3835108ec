use core::fmt;

use anyhow::Result;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;
use tracing::info_span;

use crate::config::Configuration;

pub(crate) mod abi;
pub(crate) mod block;
pub(crate) mod call;
pub(crate) mod contract;
pub(crate) mod deploy;
pub(crate) mod options;
pub(crate) mod receipt;

use abi::AbiArgs;
use block::BlockArgs;
use call::CallArgs;
use contract::{DeleteArgs, PauseArgs, ResumeArgs};
use deploy::DeployArgs;
use receipt::ReceiptArgs;
use test::TestArgs;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Execute deployment manifests against the gateway")]
    Deploy(Box<DeployArgs>),
    #[command(about = "Run test manifests and check receipts against expectations")]
    Test(Box<TestArgs>),
    #[command(about = "Interact with the block endpoints of a gateway node")]
    Block(Box<BlockArgs>),
    #[command(about = "Look up the receipt of a transaction")]
    Receipt(Box<ReceiptArgs>),
    #[command(about = "Print the ABI of the contract deployed on the channel")]
    Abi(Box<AbiArgs>),
    #[command(about = "Call a contract function on the channel")]
    Call(Box<CallArgs>),
    #[command(about = "Pause the contract on the channel")]
    Pause(Box<PauseArgs>),
    #[command(about = "Resume a paused contract on the channel")]
    Resume(Box<ResumeArgs>),
    #[command(about = "Delete the contract on the channel, clearing its state")]
    Delete(Box<DeleteArgs>),
}

impl fmt::Display for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Commands::Deploy(_) => write!(f, "Deploy"),
            Commands::Test(_) => write!(f, "Test"),
            Commands::Block(_) => write!(f, "Block"),
            Commands::Receipt(_) => write!(f, "Receipt"),
            Commands::Abi(_) => write!(f, "Abi"),
            Commands::Call(_) => write!(f, "Call"),
            Commands::Pause(_) => write!(f, "Pause"),
            Commands::Resume(_) => write!(f, "Resume"),
            Commands::Delete(_) => write!(f, "Delete"),
        }
    }
}

pub async fn run(
    command: Commands,
    config: &Configuration,
    cancellation: CancellationToken,
) -> Result<()> {
    let name = command.to_string();
    let span = info_span!("Subcommand", name);
    let _span = span.enter();

    match command {
        Commands::Deploy(args) => args.run(config, cancellation).await,
        Commands::Test(args) => args.run(config, cancellation).await,
        Commands::Block(args) => args.run(config).await,
        Commands::Receipt(args) => args.run(config).await,
        Commands::Abi(args) => args.run(config).await,
        Commands::Call(args) => args.run(config, cancellation).await,
        Commands::Pause(args) => args.run(config, cancellation).await,
        Commands::Resume(args) => args.run(config, cancellation).await,
        Commands::Delete(args) => args.run(config, cancellation).await,
    }
}
