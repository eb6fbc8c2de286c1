//! Deployment driver.
//!
//! Instantiates the contract set in dependency order: the three independent
//! contracts first, then the PDP aggregator constructed with their
//! addresses. Any rejection aborts the whole run; an operator reruns from
//! the start rather than resuming a partial deployment.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolValue,
};
use eyre::{Result, WrapErr, bail, eyre};
use std::path::Path;

use pdp_artifact::ContractArtifact;

use crate::addresses::DeployedAddresses;

/// Deploys one compiled contract and awaits its confirmation.
pub async fn deploy_contract<P: Provider>(
    provider: &P,
    artifact: &ContractArtifact,
    constructor_args: Vec<u8>,
) -> Result<Address> {
    let mut code = artifact.bytecode.to_vec();
    code.extend_from_slice(&constructor_args);

    let tx = TransactionRequest::default().with_deploy_code(Bytes::from(code));
    let receipt = provider
        .send_transaction(tx)
        .await
        .wrap_err_with(|| format!("{} deployment rejected", artifact.contract_name))?
        .get_receipt()
        .await
        .wrap_err_with(|| format!("{} deployment unconfirmed", artifact.contract_name))?;

    if !receipt.status() {
        bail!("{} deployment reverted", artifact.contract_name);
    }
    receipt
        .contract_address
        .ok_or_else(|| eyre!("no contract address in {} deploy receipt", artifact.contract_name))
}

async fn deploy_named<P: Provider>(
    provider: &P,
    artifacts_root: &Path,
    name: &str,
    constructor_args: Vec<u8>,
) -> Result<Address> {
    let artifact = ContractArtifact::load(artifacts_root, name)?;
    deploy_contract(provider, &artifact, constructor_args).await
}

/// Deploys the whole contract set and returns the address map.
pub async fn deploy_all<P: Provider>(
    provider: &P,
    artifacts_root: &Path,
) -> Result<DeployedAddresses> {
    println!("1. Deploying LoggingContract...");
    let logging = deploy_named(provider, artifacts_root, "LoggingContract", Vec::new()).await?;
    println!("✓ LoggingContract deployed to: {logging}");

    println!("\n2. Deploying PolicyContract...");
    let policy = deploy_named(provider, artifacts_root, "PolicyContract", Vec::new()).await?;
    println!("✓ PolicyContract deployed to: {policy}");

    println!("\n3. Deploying DroneContract...");
    let drone = deploy_named(provider, artifacts_root, "DroneContract", Vec::new()).await?;
    println!("✓ DroneContract deployed to: {drone}");

    println!("\n4. Deploying AttributeContract...");
    let attribute = deploy_named(provider, artifacts_root, "AttributeContract", Vec::new()).await?;
    println!("✓ AttributeContract deployed to: {attribute}");

    // The aggregator references the other three by address, so it goes last.
    println!("\n5. Deploying PDP Contract...");
    let constructor_args = (policy, drone, logging).abi_encode_params();
    let pdp = deploy_named(provider, artifacts_root, "PDP", constructor_args).await?;
    println!("✓ PDP Contract deployed to: {pdp}");

    Ok(DeployedAddresses {
        logging,
        policy,
        drone,
        attribute,
        pdp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdp_constructor_args_are_three_address_words() {
        let policy = Address::repeat_byte(0x01);
        let drone = Address::repeat_byte(0x02);
        let logging = Address::repeat_byte(0x03);

        let encoded = (policy, drone, logging).abi_encode_params();
        assert_eq!(encoded.len(), 3 * 32);
        // Addresses are right-aligned within their words.
        assert_eq!(&encoded[12..32], policy.as_slice());
        assert_eq!(&encoded[44..64], drone.as_slice());
        assert_eq!(&encoded[76..96], logging.as_slice());
    }
}
