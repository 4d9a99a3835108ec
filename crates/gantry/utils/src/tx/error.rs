//! Transaction submission errors.

use gantry_gateway::GatewayError;
use thiserror::Error;

use crate::ReceiptWaitingError;

#[derive(Debug, Error)]
pub enum TransactionError<S>
where
    S: std::error::Error,
{
    #[error("failed to sign transaction")]
    Signing(#[source] S),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Waiting(#[from] ReceiptWaitingError),
}
