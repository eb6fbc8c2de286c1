use clap::Parser;
use eyre::Result;
use std::{path::PathBuf, time::Duration};

use pdp_chain::PdpClient;
use pdp_workload::{DecisionRequest, FlushPolicy, gas, gas::GasConfig};

use crate::opts::{AddressArgs, ConnectionArgs};

#[derive(Parser, Debug)]
pub struct GasArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    addresses: AddressArgs,

    /// Decision calls per level
    #[arg(long, env = "TOTAL_TRANSACTIONS", default_value_t = 2000)]
    total_transactions: u32,

    /// Successful calls between periodic flushes of the results file
    #[arg(long, default_value_t = 100)]
    flush_interval: u32,

    /// Seconds to wait after a failed call before continuing
    #[arg(long, default_value_t = 5)]
    retry_delay: u64,

    /// Output file for the gas samples
    #[arg(long, default_value = "test-results/gasConsumption.json")]
    output: PathBuf,
}

impl GasArgs {
    pub async fn run(self) -> Result<()> {
        println!("Starting Gas Consumption Testing...\n");

        let (provider, _operator) =
            pdp_chain::connect(&self.connection.rpc_url, &self.connection.private_key)?;
        let client = PdpClient::new(provider, self.addresses.contract_addresses());
        let request = DecisionRequest::default();

        println!("Setting up test data...");
        pdp_workload::fixtures::ensure(&client, &request).await?;

        let config = GasConfig {
            total_transactions: self.total_transactions,
            flush: FlushPolicy {
                flush_interval: self.flush_interval,
                retry_delay: Duration::from_secs(self.retry_delay),
            },
        };
        let results = gas::run(&client, &request, &config, &self.output).await?;

        println!("\n========================================");
        println!("Gas consumption testing completed!");
        println!("Results saved to: {}", self.output.display());
        println!("========================================\n");

        println!("GAS CONSUMPTION SUMMARY:");
        for (level, stats) in results.iter() {
            println!("Level {}:", level.index());
            println!("  Total Transactions: {}", stats.transactions.len());
            println!("  Total Gas Used: {}", stats.total_gas);
            println!("  Average Gas per Transaction: {:.2}", stats.avg_gas);
        }
        Ok(())
    }
}
