use clap::Parser;
use opts::{PdpBench, PdpBenchSubcommand};

mod cmd;
mod opts;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = PdpBench::parse();

    match args.cmd {
        PdpBenchSubcommand::Deploy(cmd) => cmd.run().await,
        PdpBenchSubcommand::DeployToken(cmd) => cmd.run().await,
        PdpBenchSubcommand::ResponseTime(cmd) => cmd.run().await,
        PdpBenchSubcommand::Gas(cmd) => cmd.run().await,
        PdpBenchSubcommand::Export(cmd) => cmd.run().await,
        PdpBenchSubcommand::RunAll(cmd) => cmd.run().await,
    }
}
