#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! Transaction plumbing shared by the manifest executors and the CLI.

mod tx;

pub use tx::error::TransactionError;
pub use tx::submitter::*;
pub use tx::waiter::*;
pub use tx::*;
