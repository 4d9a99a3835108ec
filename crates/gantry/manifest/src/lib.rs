#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! Manifest-driven deployment and test execution against a gantry channel.
//!
//! A manifest is a YAML document describing a channel, a contract deployment
//! and an ordered list of follow-up transactions, optionally with expected
//! receipts to assert against. Manifests of type `deployment` are driven by
//! the [`DeploymentExecutor`], manifests of type `test` by the [`TestRunner`].
//! Execution is strictly sequential: no transaction is built before the
//! previous one's receipt has been reconciled.

mod deploy;
mod error;
mod loader;
mod ops;
mod runner;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use deploy::DeploymentExecutor;
pub use error::{ExecutionError, ManifestError};
pub use loader::load_manifests;
pub use runner::{CaseOutcome, FailurePolicy, TestReport, TestRunner};
pub use types::{
    ChannelManifest, Deployment, ExpectedReceipt, GatewayNode, Manifest, ManifestKind, TestCase,
    TxDescriptor, TxEntry,
};
