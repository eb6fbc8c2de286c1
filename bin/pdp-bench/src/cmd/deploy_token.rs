use alloy::primitives::utils::format_ether;
use clap::Parser;
use eyre::Result;
use std::path::PathBuf;

use pdp_artifact::ContractArtifact;

use crate::opts::ConnectionArgs;

#[derive(Parser, Debug)]
pub struct DeployTokenArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Root of the compiled contract artifacts
    #[arg(long, default_value = "artifacts")]
    artifacts_root: PathBuf,
}

impl DeployTokenArgs {
    pub async fn run(self) -> Result<()> {
        println!("Deploying test token...\n");

        let (provider, operator) =
            pdp_chain::connect(&self.connection.rpc_url, &self.connection.private_key)?;
        println!("Deploying from account: {operator}");
        pdp_chain::print_operator_balance(&provider, operator).await?;

        let artifact = ContractArtifact::load(&self.artifacts_root, "TestToken")?;
        let token = pdp_chain::deploy::deploy_contract(&provider, &artifact, Vec::new()).await?;
        println!("✓ TestToken deployed to: {token}");

        let summary = pdp_chain::token::summarize(&provider, token, operator).await?;

        println!("\n========================================");
        println!("TOKEN DEPLOYMENT SUMMARY");
        println!("========================================");
        println!("Contract Address: {token}");
        println!("Token Name:       {}", summary.name);
        println!("Token Symbol:     {}", summary.symbol);
        println!("Decimals:         {}", summary.decimals);
        println!(
            "Total Supply:     {} {}",
            format_ether(summary.total_supply),
            summary.symbol
        );
        println!(
            "Your Balance:     {} {}",
            format_ether(summary.operator_balance),
            summary.symbol
        );
        println!("========================================");

        println!("\n✓ Deployment complete!");
        Ok(())
    }
}
