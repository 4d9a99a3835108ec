//! Execution steps shared by the deployment and test executors.

use std::fs;

use gantry_gateway::{Abi, AccountId, Argument, ChannelId, GatewayClient, Receipt, Signer};
use gantry_utils::Submitter;
use tracing::info;

use crate::error::ExecutionError;
use crate::types::{ChannelManifest, TxDescriptor};

/// Resolves the hex channel and owner identifiers declared on the manifest.
pub(crate) fn resolve_ids<E>(
    channel: &ChannelManifest,
) -> Result<(ChannelId, AccountId), ExecutionError<E>>
where
    E: std::error::Error,
{
    let id = ChannelId::from_hex(&channel.id).map_err(|source| {
        ExecutionError::InvalidIdentifier { field: "channel", value: channel.id.clone(), source }
    })?;
    let owner = AccountId::from_hex(&channel.owner).map_err(|source| {
        ExecutionError::InvalidIdentifier { field: "owner", value: channel.owner.clone(), source }
    })?;
    Ok((id, owner))
}

/// Loads the contract bytecode and ABI from the paths named in the manifest.
pub(crate) fn load_artifacts<E>(
    channel: &ChannelManifest,
) -> Result<(Abi, Vec<u8>), ExecutionError<E>>
where
    E: std::error::Error,
{
    let raw = fs::read_to_string(&channel.abi_file).map_err(|source| {
        ExecutionError::FileRead { what: "ABI", path: channel.abi_file.clone(), source }
    })?;
    let abi = serde_json::from_str(&raw).map_err(|source| ExecutionError::AbiParse {
        path: channel.abi_file.clone(),
        source,
    })?;

    let bytecode = fs::read(&channel.contract_file).map_err(|source| {
        ExecutionError::FileRead { what: "contract", path: channel.contract_file.clone(), source }
    })?;

    Ok((abi, bytecode))
}

/// Builds, signs and submits a deploy transaction, reconciling its receipt.
pub(crate) async fn deploy_contract<C, S>(
    submitter: &Submitter<'_, C, S>,
    sender: AccountId,
    channel: ChannelId,
    owner: AccountId,
    manifest: &ChannelManifest,
    label: &str,
) -> Result<Receipt, ExecutionError<S::Error>>
where
    C: GatewayClient,
    S: Signer,
{
    let (abi, bytecode) = load_artifacts(manifest)?;

    let tx = submitter
        .builder(sender, channel)
        .await
        .map_err(|source| ExecutionError::Deploy {
            name: label.to_string(),
            source: source.into(),
        })?
        .deploy(owner, manifest.version.clone(), abi, bytecode);

    let (id, receipt) = submitter
        .submit(tx)
        .await
        .map_err(|source| ExecutionError::Deploy { name: label.to_string(), source })?;

    info!(%id, name = label, status = receipt.status, "Contract deployed.");
    Ok(receipt)
}

/// Builds, signs and submits a call transaction described by the manifest,
/// translating its string arguments into wire arguments.
pub(crate) async fn submit_call<C, S>(
    submitter: &Submitter<'_, C, S>,
    sender: AccountId,
    channel: ChannelId,
    descriptor: &TxDescriptor,
) -> Result<Receipt, ExecutionError<S::Error>>
where
    C: GatewayClient,
    S: Signer,
{
    let args: Vec<Argument> = descriptor.args.iter().cloned().map(Argument::from).collect();

    let tx = submitter
        .builder(sender, channel)
        .await
        .map_err(|source| ExecutionError::Call {
            function: descriptor.function.clone(),
            source: source.into(),
        })?
        .call(descriptor.function.clone(), args);

    let (id, receipt) = submitter.submit(tx).await.map_err(|source| ExecutionError::Call {
        function: descriptor.function.clone(),
        source,
    })?;

    info!(
        %id,
        function = %descriptor.function,
        status = receipt.status,
        result = %receipt.result,
        "Transaction complete."
    );
    Ok(receipt)
}
