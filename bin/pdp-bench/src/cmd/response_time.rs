use clap::Parser;
use eyre::Result;
use std::path::PathBuf;

use pdp_chain::PdpClient;
use pdp_workload::{DecisionRequest, latency, latency::LatencyConfig};

use crate::opts::{AddressArgs, ConnectionArgs};

#[derive(Parser, Debug)]
pub struct ResponseTimeArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    addresses: AddressArgs,

    /// Largest per-trial transaction count; trials cover 1..=max-tx
    #[arg(long, env = "RESPONSE_TIME_MAX_TX", default_value_t = 20)]
    max_tx: u32,

    /// Repetitions per transaction count
    #[arg(long, env = "RESPONSE_TIME_REPETITIONS", default_value_t = 10)]
    repetitions: u32,

    /// Output file for the latency samples
    #[arg(long, default_value = "test-results/responseTime.json")]
    output: PathBuf,
}

impl ResponseTimeArgs {
    pub async fn run(self) -> Result<()> {
        println!("Starting Response Time Testing...\n");

        let (provider, _operator) =
            pdp_chain::connect(&self.connection.rpc_url, &self.connection.private_key)?;
        let client = PdpClient::new(provider, self.addresses.contract_addresses());
        let request = DecisionRequest::default();

        println!("Setting up test data...");
        pdp_workload::fixtures::ensure(&client, &request).await?;

        let config = LatencyConfig {
            max_tx: self.max_tx,
            repetitions: self.repetitions,
        };
        let results = latency::run(&client, &request, &config, &self.output).await?;

        println!("\n========================================");
        println!("Response time testing completed!");
        println!("Results saved to: {}", self.output.display());
        println!("========================================\n");

        println!("SUMMARY STATISTICS:");
        for (level, samples) in results.iter() {
            if let Some(avg) = latency::level_average_ms(samples) {
                println!(
                    "Level {} - Average: {avg:.2}ms ({} tests)",
                    level.index(),
                    samples.len()
                );
            }
        }
        Ok(())
    }
}
