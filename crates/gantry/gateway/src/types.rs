//! Transaction, receipt and block wire types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error raised when a hex-encoded identifier cannot be parsed.
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("expected {expected} hex characters, got {got}")]
    Length { expected: usize, got: usize },
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

macro_rules! wire_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Parses the identifier from a 64-character hex string.
            pub fn from_hex(s: &str) -> Result<Self, IdParseError> {
                if s.len() != 64 {
                    return Err(IdParseError::Length { expected: 64, got: s.len() });
                }
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&hex::encode(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_id! {
    /// Identifier of a contract-bearing channel on the ledger.
    ChannelId
}

wire_id! {
    /// Identifier of an account, the Ed25519 public key of its owner.
    AccountId
}

wire_id! {
    /// Hash identifying a submitted transaction on the gateway.
    TransactionId
}

/// A single wire argument. Manifest string arguments are translated into this
/// type before being placed in a [`Operation::Call`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argument(pub String);

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operation carried by a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    /// Invoke a contract function with wire arguments.
    Call { function: String, args: Vec<Argument> },
    /// Deploy a contract (ABI + bytecode) to the channel.
    Deploy {
        owner: AccountId,
        version: String,
        abi: Abi,
        #[serde(with = "hex_bytes")]
        bytecode: Vec<u8>,
    },
    /// Pause or resume the channel contract.
    Pause { paused: bool },
    /// Delete the channel contract, clearing its state.
    Delete,
}

/// An unsigned transaction addressed to a channel.
///
/// The nonce is expected to be fresh per transaction and `valid_until` bounds
/// the block height at which the gateway may still include it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: AccountId,
    pub channel: ChannelId,
    pub nonce: u64,
    pub valid_until: u64,
    pub operation: Operation,
}

impl Transaction {
    /// Canonical byte encoding covered by the signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// A transaction together with the Ed25519 signature over its canonical
/// encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

/// Execution result produced by the gateway for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub status: u32,
    pub result: String,
}

/// Current chain height of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeight {
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub block_hash: String,
    pub previous_hash: String,
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub transactions: Vec<TransactionId>,
}

/// Application binary interface of a channel contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abi {
    pub version: String,
    #[serde(default)]
    pub functions: Vec<AbiFunction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiFunction {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub outputs: Vec<AbiParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const CHANNEL_HEX: &str = "2f98f46f6b0d0a9b6a87361f0b0a3d151e6c3b7df383915e0fbbd13d722836d5";

    #[test]
    fn id_round_trips_through_hex() {
        let id = ChannelId::from_hex(CHANNEL_HEX).unwrap();
        assert_eq!(id.to_string(), CHANNEL_HEX);
    }

    #[test]
    fn id_rejects_wrong_length() {
        assert_matches!(
            ChannelId::from_hex("abcd"),
            Err(IdParseError::Length { expected: 64, got: 4 })
        );
    }

    #[test]
    fn id_rejects_non_hex() {
        let s = "zz".repeat(32);
        assert_matches!(ChannelId::from_hex(&s), Err(IdParseError::Hex(_)));
    }

    #[test]
    fn signing_bytes_cover_the_operation() {
        let sender = AccountId::default();
        let channel = ChannelId::from_hex(CHANNEL_HEX).unwrap();

        let a = Transaction {
            sender,
            channel,
            nonce: 7,
            valid_until: 100,
            operation: Operation::Call { function: "get".into(), args: vec!["k".into()] },
        };
        let mut b = a.clone();
        b.operation = Operation::Delete;

        assert_ne!(a.signing_bytes().unwrap(), b.signing_bytes().unwrap());
    }

    #[test]
    fn abi_deserializes_from_json() {
        let content = r#"{
            "version": "0.1",
            "functions": [
                {
                    "type": "read",
                    "name": "get",
                    "inputs": [ { "name": "key", "type": "string" } ],
                    "outputs": [ { "name": "value", "type": "string" } ]
                }
            ]
        }"#;

        let abi: Abi = serde_json::from_str(content).unwrap();
        assert_eq!(abi.version, "0.1");
        assert_eq!(abi.functions[0].name, "get");
        assert_eq!(abi.functions[0].inputs[0].ty, "string");
    }
}
