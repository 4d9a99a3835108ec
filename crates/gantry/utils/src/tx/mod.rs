pub mod error;
pub mod submitter;
pub mod waiter;

use std::time::Duration;

use gantry_gateway::{Abi, AccountId, Argument, ChannelId, Operation, Transaction};

/// The transaction configuration to use when building and sending a
/// transaction.
#[derive(Debug, Clone, Copy)]
pub struct TxnConfig {
    /// How many blocks past the current height a transaction stays valid.
    pub expiry_window: u64,
    /// Receipt lookup retry budget.
    pub max_retries: u32,
    /// Backoff unit; the sleep before retry `n` is `retry_interval * n`.
    pub retry_interval: Duration,
}

impl Default for TxnConfig {
    fn default() -> Self {
        Self {
            expiry_window: 100,
            max_retries: 10,
            retry_interval: Duration::from_secs(1),
        }
    }
}

/// Returns a fresh random nonce.
///
/// Uniqueness per signer/channel pair is probabilistic; the gateway enforces
/// replay protection within the expiration window.
pub fn generate_nonce() -> u64 {
    rand::random()
}

/// Fluent builder translating operation descriptions into wire transactions.
///
/// A fresh nonce is drawn at construction, immediately before signing, so a
/// builder must not be reused across transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    sender: AccountId,
    channel: ChannelId,
    nonce: u64,
    valid_until: u64,
}

impl TransactionBuilder {
    pub fn new(sender: AccountId, channel: ChannelId, valid_until: u64) -> Self {
        Self { sender, channel, nonce: generate_nonce(), valid_until }
    }

    /// Overrides the generated nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Builds a function call transaction.
    pub fn call(self, function: impl Into<String>, args: Vec<Argument>) -> Transaction {
        self.finish(Operation::Call { function: function.into(), args })
    }

    /// Builds a contract deployment transaction.
    pub fn deploy(
        self,
        owner: AccountId,
        version: impl Into<String>,
        abi: Abi,
        bytecode: Vec<u8>,
    ) -> Transaction {
        self.finish(Operation::Deploy { owner, version: version.into(), abi, bytecode })
    }

    /// Builds a pause/resume transaction for the channel contract.
    pub fn pause(self, paused: bool) -> Transaction {
        self.finish(Operation::Pause { paused })
    }

    /// Builds a contract delete transaction.
    pub fn delete(self) -> Transaction {
        self.finish(Operation::Delete)
    }

    fn finish(self, operation: Operation) -> Transaction {
        Transaction {
            sender: self.sender,
            channel: self.channel,
            nonce: self.nonce,
            valid_until: self.valid_until,
            operation,
        }
    }
}
