//! Signs, submits and reconciles transactions, one at a time.

use gantry_gateway::{
    AccountId, ChannelId, GatewayClient, GatewayError, Receipt, Signer, Transaction, TransactionId,
};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::{ReceiptWaiter, TransactionBuilder, TransactionError, TxnConfig};

/// Drives a transaction through sign → submit → reconcile.
///
/// Methods take `&self` and callers are expected to submit sequentially; the
/// submitter never has more than one transaction in flight.
#[derive(Debug)]
pub struct Submitter<'a, C, S>
where
    C: GatewayClient,
    S: Signer,
{
    client: &'a C,
    signer: &'a S,
    txn_config: TxnConfig,
    cancellation: CancellationToken,
}

impl<'a, C, S> Submitter<'a, C, S>
where
    C: GatewayClient,
    S: Signer,
{
    pub fn new(client: &'a C, signer: &'a S, txn_config: TxnConfig) -> Self {
        Self { client, signer, txn_config, cancellation: CancellationToken::new() }
    }

    /// Attaches a cancellation token threaded into every receipt wait.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn config(&self) -> &TxnConfig {
        &self.txn_config
    }

    /// Starts a transaction builder whose expiration is bounded relative to
    /// the channel's current block height.
    pub async fn builder(
        &self,
        sender: AccountId,
        channel: ChannelId,
    ) -> Result<TransactionBuilder, GatewayError> {
        let height = self.client.block_height(channel).await?.height;
        Ok(TransactionBuilder::new(sender, channel, height + self.txn_config.expiry_window))
    }

    /// Signs and submits a transaction, then reconciles its receipt.
    ///
    /// An inline receipt returned by the gateway short-circuits the poll.
    pub async fn submit(
        &self,
        transaction: Transaction,
    ) -> Result<(TransactionId, Receipt), TransactionError<S::Error>> {
        let channel = transaction.channel;
        let signed = self.signer.sign(transaction).map_err(TransactionError::Signing)?;

        let outcome = self.client.submit_transaction(&signed).await?;
        trace!(id = %outcome.id, "Transaction submitted.");

        let receipt = match outcome.receipt {
            Some(receipt) => receipt,
            None => {
                ReceiptWaiter::new(self.client, channel, outcome.id)
                    .with_max_retries(self.txn_config.max_retries)
                    .with_interval(self.txn_config.retry_interval)
                    .with_cancellation(self.cancellation.clone())
                    .wait()
                    .await?
            }
        };

        Ok((outcome.id, receipt))
    }
}
