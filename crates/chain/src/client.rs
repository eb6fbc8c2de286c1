//! Signing provider setup and the live backend implementation.

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, U256, utils::format_ether},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
    transports::http::reqwest::Url,
};
use eyre::{Result, WrapErr, bail};

use pdp_workload::{AccessControlBackend, CallReceipt, DecisionRequest, Level};

use crate::contracts::{IDrone, IPdp, IPolicy};

/// Connects to the backend endpoint with a signing identity and returns the
/// provider together with the operator address.
pub fn connect(rpc_url: &str, private_key: &str) -> Result<(impl Provider + Clone, Address)> {
    let signer: PrivateKeySigner = private_key
        .trim()
        .parse()
        .wrap_err("invalid signing credential")?;
    let operator = signer.address();

    let url: Url = rpc_url.parse().wrap_err("invalid RPC URL")?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url);

    Ok((provider, operator))
}

/// Reads and prints the operator's current balance.
pub async fn print_operator_balance<P: Provider>(provider: &P, operator: Address) -> Result<()> {
    let balance = provider
        .get_balance(operator)
        .await
        .wrap_err("failed to read operator balance")?;
    println!("Account balance: {} ETH\n", format_ether(balance));
    Ok(())
}

/// Addresses of the deployed contracts a workload run drives.
#[derive(Debug, Clone, Copy)]
pub struct ContractAddresses {
    pub pdp: Address,
    pub drone: Address,
    pub policy: Address,
}

/// Live [`AccessControlBackend`]: every call is a signed transaction whose
/// receipt is awaited before the method returns.
pub struct PdpClient<P> {
    provider: P,
    addresses: ContractAddresses,
}

impl<P: Provider> PdpClient<P> {
    pub fn new(provider: P, addresses: ContractAddresses) -> Self {
        Self {
            provider,
            addresses,
        }
    }

    async fn submit(&self, to: Address, calldata: Vec<u8>) -> Result<CallReceipt> {
        let tx = TransactionRequest::default().with_to(to).with_input(calldata);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .wrap_err("transaction rejected on submission")?
            .get_receipt()
            .await
            .wrap_err("confirmation failed")?;

        if !receipt.status() {
            bail!("transaction {} reverted", receipt.transaction_hash);
        }

        Ok(CallReceipt {
            gas_used: receipt.gas_used,
            tx_hash: format!("{:#x}", receipt.transaction_hash),
        })
    }

    async fn view(&self, to: Address, calldata: Vec<u8>) -> Result<alloy::primitives::Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(calldata);
        self.provider
            .call(tx)
            .await
            .wrap_err("read-only call failed")
    }
}

#[async_trait::async_trait]
impl<P: Provider> AccessControlBackend for PdpClient<P> {
    async fn evaluate(&self, level: Level, request: &DecisionRequest) -> Result<CallReceipt> {
        let calldata = match level {
            Level::Zero => IPdp::level0EvaluateAccessCall {
                droneId: U256::from(request.drone_id),
                name: request.drone_name.clone(),
                zone: U256::from(request.zone),
                startTime: request.window_start.clone(),
                endTime: request.window_end.clone(),
                granted: request.granted,
            }
            .abi_encode(),
            Level::One => IPdp::level1EvaluateAccessCall {
                droneId: U256::from(request.drone_id),
                name: request.drone_name.clone(),
                zone: U256::from(request.zone),
                startTime: request.window_start.clone(),
                endTime: request.window_end.clone(),
            }
            .abi_encode(),
            Level::Two => IPdp::level2EvaluateAccessCall {
                droneId: U256::from(request.drone_id),
                name: request.drone_name.clone(),
                zone: U256::from(request.zone),
            }
            .abi_encode(),
            Level::Three => IPdp::level3EvaluateAccessCall {
                droneId: U256::from(request.drone_id),
            }
            .abi_encode(),
        };
        self.submit(self.addresses.pdp, calldata).await
    }

    async fn drone_exists(&self, drone_id: u64) -> Result<bool> {
        let calldata = IDrone::droneExistsCall {
            droneId: U256::from(drone_id),
        }
        .abi_encode();
        let data = self.view(self.addresses.drone, calldata).await?;
        IDrone::droneExistsCall::abi_decode_returns(&data)
            .wrap_err("unexpected droneExists return data")
    }

    async fn create_drone(&self, name: &str, zone: u64) -> Result<CallReceipt> {
        let calldata = IDrone::createDroneCall {
            name: name.to_owned(),
            zone: U256::from(zone),
        }
        .abi_encode();
        self.submit(self.addresses.drone, calldata).await
    }

    async fn policy_exists(&self, zone: u64) -> Result<bool> {
        let calldata = IPolicy::policyExistsCall {
            zone: U256::from(zone),
        }
        .abi_encode();
        let data = self.view(self.addresses.policy, calldata).await?;
        IPolicy::policyExistsCall::abi_decode_returns(&data)
            .wrap_err("unexpected policyExists return data")
    }

    async fn create_policy(
        &self,
        zone: u64,
        window_start: &str,
        window_end: &str,
    ) -> Result<CallReceipt> {
        let calldata = IPolicy::createPolicyCall {
            zone: U256::from(zone),
            startTime: window_start.to_owned(),
            endTime: window_end.to_owned(),
        }
        .abi_encode();
        self.submit(self.addresses.policy, calldata).await
    }
}
