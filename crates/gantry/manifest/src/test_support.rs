//! Scripted gateway and manifest fixtures shared by executor tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gantry_gateway::{
    Abi, Block, BlockHeight, ChannelId, GatewayClient, GatewayError, Operation, Receipt,
    SignedTransaction, SubmitOutcome, TransactionId,
};
use tempfile::TempDir;

use crate::types::{ChannelManifest, Deployment, Manifest, ManifestKind, TxDescriptor, TxEntry};

pub(crate) const CHANNEL_HEX: &str =
    "2f98f46f6b0d0a9b6a87361f0b0a3d151e6c3b7df383915e0fbbd13d722836d5";
pub(crate) const OWNER_HEX: &str =
    "3b1c43a6c43bb1005f5ea2059b6a592ee086c4cedb9e25d87c0b8b975e47b245";
pub(crate) const SEED_HEX: &str =
    "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

pub(crate) fn ok_receipt() -> Receipt {
    Receipt { status: 0, result: "ok".to_string() }
}

/// What the gateway answers for one submission, consumed in order. Once the
/// plan is exhausted every submission gets an inline ok receipt.
pub(crate) enum SubmitPlan {
    /// Inline receipt returned with the submission.
    Receipt(Receipt),
    /// Submission accepted but the receipt never materializes; lookups fail.
    Unresolved,
    /// Submission refused by the gateway.
    Reject(&'static str),
}

pub(crate) struct ScriptedGateway {
    plan: Mutex<VecDeque<SubmitPlan>>,
    submissions: Mutex<Vec<Operation>>,
}

impl ScriptedGateway {
    pub(crate) fn new(plan: Vec<SubmitPlan>) -> Self {
        Self { plan: Mutex::new(plan.into()), submissions: Mutex::new(vec![]) }
    }

    pub(crate) fn ok() -> Self {
        Self::new(vec![])
    }

    /// Labels of the submitted operations, in submission order.
    pub(crate) fn submitted(&self) -> Vec<String> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .map(|op| match op {
                Operation::Call { function, .. } => function.clone(),
                Operation::Deploy { .. } => "deploy".to_string(),
                Operation::Pause { .. } => "pause".to_string(),
                Operation::Delete => "delete".to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl GatewayClient for ScriptedGateway {
    async fn submit_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<SubmitOutcome, GatewayError> {
        self.submissions.lock().unwrap().push(transaction.transaction.operation.clone());
        match self.plan.lock().unwrap().pop_front() {
            Some(SubmitPlan::Receipt(receipt)) => {
                Ok(SubmitOutcome { id: TransactionId::default(), receipt: Some(receipt) })
            }
            Some(SubmitPlan::Unresolved) => {
                Ok(SubmitOutcome { id: TransactionId::default(), receipt: None })
            }
            Some(SubmitPlan::Reject(reason)) => Err(GatewayError::Rejected(reason.to_string())),
            None => Ok(SubmitOutcome { id: TransactionId::default(), receipt: Some(ok_receipt()) }),
        }
    }

    async fn receipt_lookup(
        &self,
        _channel: ChannelId,
        _id: TransactionId,
    ) -> Result<Receipt, GatewayError> {
        Err(GatewayError::NotFound("receipt".to_string()))
    }

    async fn block_height(&self, _channel: ChannelId) -> Result<BlockHeight, GatewayError> {
        Ok(BlockHeight { height: 10 })
    }

    async fn block_lookup(
        &self,
        _channel: ChannelId,
        _block_id: &str,
    ) -> Result<Block, GatewayError> {
        unimplemented!("not used by executors")
    }

    async fn block_list(
        &self,
        _channel: ChannelId,
        _height: u64,
        _number: u32,
    ) -> Result<Vec<Block>, GatewayError> {
        unimplemented!("not used by executors")
    }

    async fn channel_abi(&self, _channel: ChannelId) -> Result<Abi, GatewayError> {
        unimplemented!("not used by executors")
    }
}

/// Writes contract and ABI fixture files, returning the directory guard and a
/// channel manifest pointing at them.
pub(crate) fn channel_fixture() -> (TempDir, ChannelManifest) {
    let dir = tempfile::tempdir().unwrap();

    let contract_file = dir.path().join("contract.wasm");
    std::fs::write(&contract_file, b"\0asm").unwrap();

    let abi_file = dir.path().join("abi.json");
    std::fs::write(&abi_file, r#"{ "version": "0.1", "functions": [] }"#).unwrap();

    let channel = ChannelManifest {
        version: "0.1".to_string(),
        id: CHANNEL_HEX.to_string(),
        owner: OWNER_HEX.to_string(),
        contract_file,
        abi_file,
    };
    (dir, channel)
}

pub(crate) fn call_entry(function: &str) -> TxEntry {
    TxEntry {
        tx: TxDescriptor { function: function.to_string(), args: vec![], receipt: None },
    }
}

pub(crate) fn deployment_manifest(channel: ChannelManifest, functions: &[&str]) -> Manifest {
    Manifest {
        version: "1".to_string(),
        kind: ManifestKind::Deployment,
        channel,
        gateway_node: None,
        deploy: Some(Deployment {
            name: "fixture".to_string(),
            transactions: functions.iter().map(|f| call_entry(f)).collect(),
        }),
        tests: None,
    }
}

pub(crate) fn test_manifest(channel: ChannelManifest, cases: Vec<crate::TestCase>) -> Manifest {
    Manifest {
        version: "1".to_string(),
        kind: ManifestKind::Test,
        channel,
        gateway_node: None,
        deploy: None,
        tests: Some(cases),
    }
}
