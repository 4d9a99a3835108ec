//! Receipt reconciliation: poll the gateway until a receipt is produced, the
//! retry budget is exhausted, or cancellation fires, whichever comes first.

use std::time::Duration;

use gantry_gateway::{ChannelId, GatewayClient, GatewayError, Receipt, TransactionId};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug, Error)]
pub enum ReceiptWaitingError {
    /// The retry budget ran out. The source is the last lookup error the
    /// gateway returned, so callers can tell an absent receipt apart from a
    /// transport failure.
    #[error("receipt not produced after {attempts} lookups")]
    Exhausted {
        attempts: u32,
        #[source]
        last: GatewayError,
    },
    #[error("receipt wait cancelled")]
    Cancelled,
}

/// Polls for the receipt associated with a submitted transaction id.
///
/// Submission is asynchronous: a transaction is only executed once included
/// in a block, so the first lookups are expected to fail. The backoff is
/// linear in the attempt count, which bounds the total wait while tolerating
/// block-inclusion latency.
#[derive(Debug)]
pub struct ReceiptWaiter<'a, C>
where
    C: GatewayClient,
{
    client: &'a C,
    channel: ChannelId,
    id: TransactionId,
    max_retries: u32,
    interval: Duration,
    cancellation: CancellationToken,
}

impl<'a, C> ReceiptWaiter<'a, C>
where
    C: GatewayClient,
{
    const DEFAULT_MAX_RETRIES: u32 = 10;
    const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(client: &'a C, channel: ChannelId, id: TransactionId) -> Self {
        Self {
            client,
            channel,
            id,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            interval: Self::DEFAULT_INTERVAL,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Attaches a cancellation token; an in-progress wait returns
    /// [`ReceiptWaitingError::Cancelled`] promptly once it fires.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub async fn wait(self) -> Result<Receipt, ReceiptWaitingError> {
        let mut attempt: u32 = 0;

        loop {
            match self.client.receipt_lookup(self.channel, self.id).await {
                Ok(receipt) => return Ok(receipt),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.max_retries {
                        return Err(ReceiptWaitingError::Exhausted { attempts: attempt, last: err });
                    }

                    trace!(id = %self.id, attempt, error = %err, "Receipt not available yet.");

                    tokio::select! {
                        _ = self.cancellation.cancelled() => {
                            return Err(ReceiptWaitingError::Cancelled);
                        }
                        _ = tokio::time::sleep(self.interval * attempt) => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use gantry_gateway::{Abi, Block, BlockHeight, SignedTransaction, SubmitOutcome};

    use super::*;

    /// Gateway stub whose receipt lookup fails a fixed number of times before
    /// succeeding.
    struct FlakyGateway {
        failures: u32,
        lookups: AtomicU32,
    }

    impl FlakyGateway {
        fn new(failures: u32) -> Self {
            Self { failures, lookups: AtomicU32::new(0) }
        }
    }

    #[async_trait]
    impl GatewayClient for FlakyGateway {
        async fn submit_transaction(
            &self,
            _transaction: &SignedTransaction,
        ) -> Result<SubmitOutcome, GatewayError> {
            unimplemented!("not used by the waiter")
        }

        async fn receipt_lookup(
            &self,
            _channel: ChannelId,
            _id: TransactionId,
        ) -> Result<Receipt, GatewayError> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(GatewayError::NotFound("receipt".to_string()))
            } else {
                Ok(Receipt { status: 0, result: "ok".to_string() })
            }
        }

        async fn block_height(&self, _channel: ChannelId) -> Result<BlockHeight, GatewayError> {
            unimplemented!("not used by the waiter")
        }

        async fn block_lookup(
            &self,
            _channel: ChannelId,
            _block_id: &str,
        ) -> Result<Block, GatewayError> {
            unimplemented!("not used by the waiter")
        }

        async fn block_list(
            &self,
            _channel: ChannelId,
            _height: u64,
            _number: u32,
        ) -> Result<Vec<Block>, GatewayError> {
            unimplemented!("not used by the waiter")
        }

        async fn channel_abi(&self, _channel: ChannelId) -> Result<Abi, GatewayError> {
            unimplemented!("not used by the waiter")
        }
    }

    fn waiter(gateway: &FlakyGateway) -> ReceiptWaiter<'_, FlakyGateway> {
        ReceiptWaiter::new(gateway, ChannelId::default(), TransactionId::default())
    }

    #[tokio::test(start_paused = true)]
    async fn returns_receipt_once_lookup_succeeds() {
        let gateway = FlakyGateway::new(3);

        let receipt = waiter(&gateway).wait().await.unwrap();

        assert_eq!(receipt.result, "ok");
        assert_eq!(gateway.lookups.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_budget_with_last_error() {
        let gateway = FlakyGateway::new(u32::MAX);

        let err = waiter(&gateway).wait().await.unwrap_err();

        assert_matches!(
            err,
            ReceiptWaitingError::Exhausted { attempts: 10, last: GatewayError::NotFound(_) }
        );
        assert_eq!(gateway.lookups.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_the_wait() {
        let gateway = FlakyGateway::new(u32::MAX);
        let token = CancellationToken::new();
        token.cancel();

        let err = waiter(&gateway).with_cancellation(token).wait().await.unwrap_err();

        assert_matches!(err, ReceiptWaitingError::Cancelled);
        assert_eq!(gateway.lookups.load(Ordering::SeqCst), 1);
    }
}
