//! Typed representation of a deployment/test manifest document.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Discriminates manifest documents. Documents of a kind the loader was not
/// asked for are skipped; unrecognized kinds never fail the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    Deployment,
    Test,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestKind::Deployment => write!(f, "deployment"),
            ManifestKind::Test => write!(f, "test"),
            ManifestKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Root manifest document.
///
/// Created fresh per YAML document during load, immutable thereafter, and
/// discarded once its executor run completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Schema version tag.
    pub version: String,
    #[serde(rename = "type")]
    pub kind: ManifestKind,
    pub channel: ChannelManifest,
    /// Informational; the connection is established by the caller-supplied
    /// gateway client, not by the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_node: Option<GatewayNode>,
    /// Present when `type: deployment`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<Deployment>,
    /// Present when `type: test`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<TestCase>>,
}

/// Channel metadata shared by every transaction in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChannelManifest {
    /// Contract version string.
    pub version: String,
    /// Hex channel identifier.
    pub id: String,
    /// Hex identifier of the contract owner.
    pub owner: String,
    /// Path to the contract bytecode.
    pub contract_file: PathBuf,
    /// Path to the JSON ABI.
    pub abi_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GatewayNode {
    pub address: Url,
}

/// A named deployment with ordered follow-up transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    #[serde(default)]
    pub transactions: Vec<TxEntry>,
}

/// A named test case: optional contract reset, then ordered transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub reset: bool,
    #[serde(default)]
    pub transactions: Vec<TxEntry>,
}

/// Wrapper matching the manifest's `- tx:` list layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxEntry {
    pub tx: TxDescriptor,
}

/// One transaction description: a function call with string arguments and an
/// optional expected receipt to assert against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxDescriptor {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ExpectedReceipt>,
}

/// Expected receipt: both fields participate in the assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedReceipt {
    pub status: u32,
    pub result: String,
}
