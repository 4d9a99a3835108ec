//! The gateway client contract and its HTTP implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::error::GatewayError;
use crate::types::{Abi, Block, BlockHeight, ChannelId, Receipt, SignedTransaction, TransactionId};

/// Result of submitting a signed transaction.
///
/// The gateway may execute the transaction synchronously and return the
/// receipt inline. When `receipt` is `None` the caller is expected to
/// reconcile the receipt by polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub id: TransactionId,
    #[serde(default)]
    pub receipt: Option<Receipt>,
}

/// The remote ledger gateway, as consumed by the transaction plumbing and the
/// manifest executors.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Submits a signed transaction, returning its id and, when the gateway
    /// executed it synchronously, an inline receipt.
    async fn submit_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<SubmitOutcome, GatewayError>;

    /// Looks up the receipt produced for a transaction id.
    async fn receipt_lookup(
        &self,
        channel: ChannelId,
        id: TransactionId,
    ) -> Result<Receipt, GatewayError>;

    /// Returns the current block height of the channel.
    async fn block_height(&self, channel: ChannelId) -> Result<BlockHeight, GatewayError>;

    /// Returns a block by hash or height.
    async fn block_lookup(&self, channel: ChannelId, block_id: &str)
        -> Result<Block, GatewayError>;

    /// Lists `number` blocks starting at `height`.
    async fn block_list(
        &self,
        channel: ChannelId,
        height: u64,
        number: u32,
    ) -> Result<Vec<Block>, GatewayError>;

    /// Returns the ABI of the contract deployed on the channel.
    async fn channel_abi(&self, channel: ChannelId) -> Result<Abi, GatewayError>;
}

/// JSON-over-HTTP implementation of [`GatewayClient`].
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpGatewayClient {
    pub fn new(base: Url) -> Self {
        Self { http: reqwest::Client::new(), base }
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.endpoint(path)?;
        trace!(%url, "Gateway lookup.");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UnexpectedStatus { status: status.as_u16(), body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn submit_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<SubmitOutcome, GatewayError> {
        let channel = transaction.transaction.channel;
        let url = self.endpoint(&format!("channels/{channel}/transactions"))?;
        trace!(%url, "Submit transaction.");

        let response = self.http.post(url).json(transaction).send().await?;
        let status = response.status();

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UnexpectedStatus { status: status.as_u16(), body });
        }

        Ok(response.json().await?)
    }

    async fn receipt_lookup(
        &self,
        channel: ChannelId,
        id: TransactionId,
    ) -> Result<Receipt, GatewayError> {
        self.get_json(&format!("channels/{channel}/receipts/{id}")).await
    }

    async fn block_height(&self, channel: ChannelId) -> Result<BlockHeight, GatewayError> {
        self.get_json(&format!("channels/{channel}/blocks/height")).await
    }

    async fn block_lookup(
        &self,
        channel: ChannelId,
        block_id: &str,
    ) -> Result<Block, GatewayError> {
        self.get_json(&format!("channels/{channel}/blocks/{block_id}")).await
    }

    async fn block_list(
        &self,
        channel: ChannelId,
        height: u64,
        number: u32,
    ) -> Result<Vec<Block>, GatewayError> {
        self.get_json(&format!("channels/{channel}/blocks?height={height}&number={number}")).await
    }

    async fn channel_abi(&self, channel: ChannelId) -> Result<Abi, GatewayError> {
        self.get_json(&format!("channels/{channel}/abi")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_joined_on_the_base_url() {
        let client =
            HttpGatewayClient::new(Url::parse("http://localhost:6299/gateway/").unwrap());
        let channel = ChannelId::default();

        let url = client.endpoint(&format!("channels/{channel}/blocks/height")).unwrap();
        assert_eq!(
            url.as_str(),
            format!("http://localhost:6299/gateway/channels/{channel}/blocks/height")
        );
    }

    #[test]
    fn submit_outcome_tolerates_missing_receipt() {
        let outcome: SubmitOutcome =
            serde_json::from_str(&format!("{{\"id\": \"{}\"}}", TransactionId::default()))
                .unwrap();
        assert!(outcome.receipt.is_none());
    }
}
