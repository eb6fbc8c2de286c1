use clap::Parser;
use eyre::Result;
use std::path::PathBuf;

use crate::opts::ConnectionArgs;

#[derive(Parser, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Root of the compiled contract artifacts
    #[arg(long, default_value = "artifacts")]
    artifacts_root: PathBuf,

    /// Where to persist the deployed addresses
    #[arg(long, default_value = "deployed-addresses.json")]
    output: PathBuf,
}

impl DeployArgs {
    pub async fn run(self) -> Result<()> {
        println!("Starting deployment...\n");

        let (provider, operator) =
            pdp_chain::connect(&self.connection.rpc_url, &self.connection.private_key)?;
        println!("Deploying from account: {operator}");
        pdp_chain::print_operator_balance(&provider, operator).await?;

        let addresses = pdp_chain::deploy::deploy_all(&provider, &self.artifacts_root).await?;

        println!("\n========================================");
        println!("DEPLOYMENT SUMMARY");
        println!("========================================");
        println!("LoggingContract:   {}", addresses.logging);
        println!("PolicyContract:    {}", addresses.policy);
        println!("DroneContract:     {}", addresses.drone);
        println!("AttributeContract: {}", addresses.attribute);
        println!("PDP Contract:      {}", addresses.pdp);
        println!("========================================");

        println!("\nAdd these to your .env file:");
        println!("{}", addresses.env_lines());

        addresses.save(&self.output)?;
        println!(
            "\n✓ Contract addresses saved to {}",
            self.output.display()
        );
        Ok(())
    }
}
