use std::time::Duration;

use clap::Args;
use gantry_utils::TxnConfig;

#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Transaction options")]
pub struct TransactionOptions {
    #[arg(long)]
    #[arg(help = "How many blocks past the current height a transaction stays valid.")]
    #[arg(global = true)]
    #[arg(default_value_t = 100)]
    pub expiry_window: u64,

    #[arg(long)]
    #[arg(help = "Maximum number of receipt lookups before giving up on a transaction.")]
    #[arg(global = true)]
    #[arg(default_value_t = 10)]
    pub max_retries: u32,

    #[arg(long)]
    #[arg(value_name = "SECONDS")]
    #[arg(help = "Backoff unit between receipt lookups; the n-th retry waits n times this long.")]
    #[arg(global = true)]
    #[arg(default_value_t = 1)]
    pub retry_interval: u64,
}

impl TransactionOptions {
    pub fn txn_config(&self) -> TxnConfig {
        TxnConfig {
            expiry_window: self.expiry_window,
            max_retries: self.max_retries,
            retry_interval: Duration::from_secs(self.retry_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Command {
        #[clap(flatten)]
        options: TransactionOptions,
    }

    #[test]
    fn defaults_match_txn_config_defaults() {
        let cmd = Command::parse_from(["gantry"]);
        let config = cmd.options.txn_config();
        let default = TxnConfig::default();

        assert_eq!(config.expiry_window, default.expiry_window);
        assert_eq!(config.max_retries, default.max_retries);
        assert_eq!(config.retry_interval, default.retry_interval);
    }

    #[test]
    fn flags_override_defaults() {
        let cmd = Command::parse_from(["gantry", "--expiry-window", "25", "--retry-interval", "3"]);
        let config = cmd.options.txn_config();

        assert_eq!(config.expiry_window, 25);
        assert_eq!(config.retry_interval, Duration::from_secs(3));
    }
}
