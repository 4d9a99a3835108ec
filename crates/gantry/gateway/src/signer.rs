//! Transaction signing.

use ed25519_dalek::{Signer as _, SigningKey};
use thiserror::Error;

use crate::types::{AccountId, IdParseError, SignedTransaction, Transaction};

#[derive(Debug, Error)]
pub enum SignError {
    #[error("failed to encode transaction for signing")]
    Encode(#[from] serde_json::Error),
}

/// Produces a signature over a transaction.
///
/// Executors are generic over this trait so tests can substitute a recording
/// signer; production code uses [`LocalSigner`].
pub trait Signer: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn sign(&self, transaction: Transaction) -> Result<SignedTransaction, Self::Error>;

    /// The account id of this signer, its Ed25519 public key.
    fn public_key(&self) -> AccountId;
}

/// In-process Ed25519 signer holding the private key material.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
}

impl LocalSigner {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Builds a signer from a 64-character hex-encoded private key seed.
    pub fn from_hex(s: &str) -> Result<Self, IdParseError> {
        if s.len() != 64 {
            return Err(IdParseError::Length { expected: 64, got: s.len() });
        }
        let mut seed = [0u8; 32];
        hex::decode_to_slice(s, &mut seed)?;
        Ok(Self { key: SigningKey::from_bytes(&seed) })
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner").field("public_key", &self.public_key()).finish()
    }
}

impl Signer for LocalSigner {
    type Error = SignError;

    fn sign(&self, transaction: Transaction) -> Result<SignedTransaction, Self::Error> {
        let payload = transaction.signing_bytes()?;
        let signature = self.key.sign(&payload);
        Ok(SignedTransaction { transaction, signature: signature.to_bytes().to_vec() })
    }

    fn public_key(&self) -> AccountId {
        AccountId::new(self.key.verifying_key().to_bytes())
    }
}
