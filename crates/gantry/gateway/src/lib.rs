#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! Wire types and collaborator contracts for a gantry channel gateway.
//!
//! A channel is a contract-bearing address on the remote ledger. This crate
//! owns the transaction wire model, the [`GatewayClient`] trait consumed by
//! the executors, a thin HTTP implementation of it, and the [`Signer`]
//! contract used to authorize transactions.

mod client;
mod error;
mod signer;
mod types;

pub use client::{GatewayClient, HttpGatewayClient, SubmitOutcome};
pub use error::GatewayError;
pub use signer::{LocalSigner, SignError, Signer};
pub use types::{
    Abi, AbiFunction, AbiParameter, AccountId, Argument, Block, BlockHeader, BlockHeight,
    ChannelId, IdParseError, Operation, Receipt, SignedTransaction, Transaction, TransactionId,
};
