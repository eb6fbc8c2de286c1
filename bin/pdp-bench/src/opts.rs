use crate::cmd::{
    deploy::DeployArgs, deploy_token::DeployTokenArgs, export::ExportArgs, gas::GasArgs,
    response_time::ResponseTimeArgs, run_all::RunAllArgs,
};
use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use pdp_chain::ContractAddresses;

#[derive(Parser, Debug)]
#[command(name = "pdp-bench")]
#[command(version, about = "Benchmark driver for the on-chain PDP access-control contracts", long_about = None)]
pub struct PdpBench {
    #[command(subcommand)]
    pub cmd: PdpBenchSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PdpBenchSubcommand {
    /// Deploy the contract set and persist the addresses
    Deploy(DeployArgs),

    /// Deploy the standalone test token
    DeployToken(DeployTokenArgs),

    /// Measure decision-call latency across the four levels
    ResponseTime(ResponseTimeArgs),

    /// Measure gas per decision call at high volume
    Gas(GasArgs),

    /// Render the measurement files into the xlsx workbook
    Export(ExportArgs),

    /// Response time, gas and export in one run
    RunAll(RunAllArgs),
}

/// Backend connection shared by every network-touching command.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// JSON-RPC endpoint of the target network
    #[arg(long, env = "SEPOLIA_RPC_URL")]
    pub rpc_url: String,

    /// Hex private key of the submitting account
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Deployed contract addresses the workload commands drive.
#[derive(Args, Debug, Clone)]
pub struct AddressArgs {
    /// PDP aggregator contract address
    #[arg(long, env = "PDP_CONTRACT_ADDRESS")]
    pub pdp: Address,

    /// Drone registry contract address
    #[arg(long, env = "DRONE_CONTRACT_ADDRESS")]
    pub drone: Address,

    /// Policy registry contract address
    #[arg(long, env = "POLICY_CONTRACT_ADDRESS")]
    pub policy: Address,
}

impl AddressArgs {
    pub fn contract_addresses(&self) -> ContractAddresses {
        ContractAddresses {
            pdp: self.pdp,
            drone: self.drone,
            policy: self.policy,
        }
    }
}
