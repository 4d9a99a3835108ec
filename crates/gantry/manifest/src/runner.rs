//! The test runner drives test manifests: each case optionally resets the
//! channel, redeploys the contract, submits its transactions and checks the
//! resulting receipts against the expected values.

use gantry_gateway::{AccountId, ChannelId, GatewayClient, Signer};
use gantry_utils::{Submitter, TxnConfig};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ExecutionError;
use crate::ops;
use crate::types::{Manifest, ManifestKind, TestCase};

/// What the runner does after a case fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing case.
    #[default]
    FailFast,
    /// Run every case and report all outcomes.
    ContinueOnFailure,
}

/// Result of a single test case.
#[derive(Debug)]
pub struct CaseOutcome<E>
where
    E: std::error::Error,
{
    pub case: String,
    pub result: Result<(), ExecutionError<E>>,
}

/// Outcomes for every executed case.
#[derive(Debug)]
pub struct TestReport<E>
where
    E: std::error::Error,
{
    pub outcomes: Vec<CaseOutcome<E>>,
}

impl<E> TestReport<E>
where
    E: std::error::Error,
{
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }
}

#[derive(Debug)]
pub struct TestRunner<'a, C, S>
where
    C: GatewayClient,
    S: Signer,
{
    submitter: Submitter<'a, C, S>,
    sender: AccountId,
    policy: FailurePolicy,
}

impl<'a, C, S> TestRunner<'a, C, S>
where
    C: GatewayClient,
    S: Signer,
{
    pub fn new(client: &'a C, signer: &'a S, txn_config: TxnConfig) -> Self {
        Self {
            sender: signer.public_key(),
            submitter: Submitter::new(client, signer, txn_config),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.submitter = self.submitter.with_cancellation(cancellation);
        self
    }

    /// Executes every manifest of type `test`, in order. Other manifest types
    /// are skipped.
    pub async fn execute(
        &self,
        manifests: &[Manifest],
    ) -> Result<TestReport<S::Error>, ExecutionError<S::Error>> {
        let mut report = TestReport { outcomes: Vec::new() };

        'manifests: for manifest in manifests {
            if manifest.kind != ManifestKind::Test {
                continue;
            }

            let cases = manifest.tests.as_ref().ok_or_else(|| ExecutionError::MissingTests {
                channel: manifest.channel.id.clone(),
            })?;

            for case in cases {
                let result = self.run_case(manifest, case).await;
                match &result {
                    Ok(()) => info!(case = %case.name, "Test case passed."),
                    Err(error) => warn!(case = %case.name, %error, "Test case failed."),
                }

                let failed = result.is_err();
                report.outcomes.push(CaseOutcome { case: case.name.clone(), result });

                if failed && self.policy == FailurePolicy::FailFast {
                    break 'manifests;
                }
            }
        }

        Ok(report)
    }

    async fn run_case(
        &self,
        manifest: &Manifest,
        case: &TestCase,
    ) -> Result<(), ExecutionError<S::Error>> {
        let (channel, owner) = ops::resolve_ids(&manifest.channel)?;

        if case.reset {
            self.reset_channel(channel, &case.name).await?;
        }

        ops::deploy_contract(
            &self.submitter,
            self.sender,
            channel,
            owner,
            &manifest.channel,
            &case.name,
        )
        .await?;

        for entry in &case.transactions {
            let receipt = ops::submit_call(&self.submitter, self.sender, channel, &entry.tx).await?;

            if let Some(expected) = &entry.tx.receipt {
                if receipt.status != expected.status {
                    return Err(ExecutionError::StatusMismatch {
                        case: case.name.clone(),
                        function: entry.tx.function.clone(),
                        expected: expected.status,
                        actual: receipt.status,
                    });
                }
                if receipt.result != expected.result {
                    return Err(ExecutionError::ResultMismatch {
                        case: case.name.clone(),
                        function: entry.tx.function.clone(),
                        expected: expected.result.clone(),
                        actual: receipt.result,
                    });
                }
            }
        }

        Ok(())
    }

    async fn reset_channel(
        &self,
        channel: ChannelId,
        case: &str,
    ) -> Result<(), ExecutionError<S::Error>> {
        info!(%channel, "Resetting channel state.");
        let transaction = self
            .submitter
            .builder(self.sender, channel)
            .await
            .map_err(|error| ExecutionError::Reset {
                case: case.to_string(),
                source: error.into(),
            })?
            .delete();

        self.submitter
            .submit(transaction)
            .await
            .map_err(|source| ExecutionError::Reset { case: case.to_string(), source })?;

        Ok(())
    }
}
