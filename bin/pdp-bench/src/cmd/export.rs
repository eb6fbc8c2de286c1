use clap::Parser;
use eyre::Result;
use pdp_report::GasSheets;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Latency results produced by `response-time`
    #[arg(long, default_value = "test-results/responseTime.json")]
    response_times: PathBuf,

    /// Gas results produced by `gas`; a placeholder sheet is emitted when absent
    #[arg(long, default_value = "test-results/gasConsumption.json")]
    gas: PathBuf,

    /// Workbook output path
    #[arg(long, default_value = "test-results/ethereum-test-results.xlsx")]
    output: PathBuf,
}

impl ExportArgs {
    pub async fn run(self) -> Result<()> {
        println!("Exporting test results to Excel...\n");

        let gas_sheets = pdp_report::export(&self.response_times, &self.gas, &self.output)?;

        println!("========================================");
        println!("Excel export completed!");
        println!("File saved to: {}", self.output.display());
        println!("========================================\n");

        println!("Workbook contains:");
        println!("- 4 sheets for Response Time (one per level)");
        match gas_sheets {
            GasSheets::Full => {
                println!("- 1 sheet for Gas Consumption Summary");
                println!("- 4 sheets for detailed Gas Consumption (one per level)");
            }
            GasSheets::Placeholder => {
                println!("- 1 placeholder sheet (no gas consumption data found)");
            }
        }
        Ok(())
    }
}
