use clap::Parser;
use eyre::Result;
use std::{path::PathBuf, time::Instant};

use pdp_chain::PdpClient;
use pdp_workload::{
    DecisionRequest, FlushPolicy,
    gas::{self, GasConfig},
    latency::{self, LatencyConfig},
};

use crate::opts::{AddressArgs, ConnectionArgs};

#[derive(Parser, Debug)]
pub struct RunAllArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    addresses: AddressArgs,

    /// Largest per-trial transaction count for the latency phase
    #[arg(long, env = "RESPONSE_TIME_MAX_TX", default_value_t = 20)]
    max_tx: u32,

    /// Repetitions per transaction count for the latency phase
    #[arg(long, env = "RESPONSE_TIME_REPETITIONS", default_value_t = 10)]
    repetitions: u32,

    /// Decision calls per level for the gas phase
    #[arg(long, env = "TOTAL_TRANSACTIONS", default_value_t = 2000)]
    total_transactions: u32,

    /// Directory receiving the measurement files and the workbook
    #[arg(long, default_value = "test-results")]
    results_dir: PathBuf,
}

impl RunAllArgs {
    pub async fn run(self) -> Result<()> {
        println!("ETHEREUM PERFORMANCE TESTING - COMPLETE SUITE");
        println!("This will run all tests and generate the Excel report.");
        println!("Estimated time: 15-24 hours\n");

        let started = Instant::now();

        let (provider, _operator) =
            pdp_chain::connect(&self.connection.rpc_url, &self.connection.private_key)?;
        let client = PdpClient::new(provider, self.addresses.contract_addresses());
        let request = DecisionRequest::default();

        println!("Setting up test data...");
        pdp_workload::fixtures::ensure(&client, &request).await?;

        let response_time_path = self.results_dir.join("responseTime.json");
        let gas_path = self.results_dir.join("gasConsumption.json");
        let workbook_path = self.results_dir.join("ethereum-test-results.xlsx");

        println!("\nSTEP 1/3: Response Time Tests (2-3 hours)");
        let latency_config = LatencyConfig {
            max_tx: self.max_tx,
            repetitions: self.repetitions,
        };
        latency::run(&client, &request, &latency_config, &response_time_path).await?;

        println!("\nSTEP 2/3: Gas Consumption Tests (12-20 hours)");
        let gas_config = GasConfig {
            total_transactions: self.total_transactions,
            flush: FlushPolicy::default(),
        };
        gas::run(&client, &request, &gas_config, &gas_path).await?;

        println!("\nSTEP 3/3: Generate Excel Report");
        pdp_report::export(&response_time_path, &gas_path, &workbook_path)?;

        let hours = started.elapsed().as_secs_f64() / 3600.0;
        println!("\n✓ ALL TESTS COMPLETED SUCCESSFULLY");
        println!("Total Time: {hours:.2} hours");
        println!("\nResults:");
        println!("  - {}", response_time_path.display());
        println!("  - {}", gas_path.display());
        println!("  - {}", workbook_path.display());
        Ok(())
    }
}
