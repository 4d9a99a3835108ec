//! Gateway-facing errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("transaction rejected by gateway: {0}")]
    Rejected(String),
    #[error("unexpected gateway response ({status}): {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
