//! Manifest loading and execution errors.

use std::io;
use std::path::PathBuf;

use gantry_gateway::IdParseError;
use gantry_utils::TransactionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed manifest document in `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised while driving a manifest against the gateway.
///
/// Every variant names the manifest element it failed on; a step failure
/// aborts the remainder of the current deployment or test case.
#[derive(Debug, Error)]
pub enum ExecutionError<S>
where
    S: std::error::Error,
{
    #[error("deployment manifest for channel `{channel}` has no deploy block")]
    MissingDeploy { channel: String },
    #[error("test manifest for channel `{channel}` has no tests")]
    MissingTests { channel: String },
    #[error("invalid {field} identifier `{value}`")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        #[source]
        source: IdParseError,
    },
    #[error("failed to read {what} file `{path}`")]
    FileRead {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed ABI JSON in `{path}`")]
    AbiParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("deploy transaction for `{name}` failed")]
    Deploy {
        name: String,
        #[source]
        source: TransactionError<S>,
    },
    #[error("reset of test case `{case}` failed")]
    Reset {
        case: String,
        #[source]
        source: TransactionError<S>,
    },
    #[error("transaction `{function}` failed")]
    Call {
        function: String,
        #[source]
        source: TransactionError<S>,
    },
    #[error("test case `{case}`, function `{function}`: expected status {expected}, got {actual}")]
    StatusMismatch { case: String, function: String, expected: u32, actual: u32 },
    #[error(
        "test case `{case}`, function `{function}`: expected result {expected:?}, got {actual:?}"
    )]
    ResultMismatch { case: String, function: String, expected: String, actual: String },
}
