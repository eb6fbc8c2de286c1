//! Cost-mode workload driver.
//!
//! A run spans hours, so progress is made durable as it happens: the whole
//! results file is rewritten every [`FlushPolicy::flush_interval`] confirmed
//! calls, immediately after any failed call, and when a level completes so
//! the file carries each finished level's mean. A crash therefore loses at
//! most one flush interval of samples.

use std::path::Path;

use eyre::{Result, WrapErr};
use indicatif::ProgressBar;
use tracing::warn;

use crate::{
    backend::{AccessControlBackend, DecisionRequest, Level},
    results::{self, FlushPolicy, GasResults, GasSample},
};

#[derive(Debug, Clone)]
pub struct GasConfig {
    /// Decision calls submitted per level.
    pub total_transactions: u32,
    pub flush: FlushPolicy,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            total_transactions: 2000,
            flush: FlushPolicy::default(),
        }
    }
}

/// Runs the cost-mode workload for every level, ascending.
///
/// A failed call is logged, the partial results are flushed, the retry
/// delay elapses and the run continues with the next call.
pub async fn run<B: AccessControlBackend + ?Sized>(
    backend: &B,
    request: &DecisionRequest,
    config: &GasConfig,
    output: &Path,
) -> Result<GasResults> {
    let mut results = GasResults::default();

    for level in Level::ALL {
        println!("\n========== Testing Level {} ==========", level.index());
        println!("Running {} transactions...\n", config.total_transactions);
        let bar = ProgressBar::new(u64::from(config.total_transactions));

        for tx_number in 1..=config.total_transactions {
            match backend.evaluate(level, request).await {
                Ok(receipt) => {
                    let flush_due = {
                        let stats = results.get_mut(level);
                        stats.record(GasSample {
                            tx_number,
                            gas_used: receipt.gas_used,
                            tx_hash: receipt.tx_hash,
                        });
                        config.flush.flush_interval > 0
                            && stats.transactions.len() as u32 % config.flush.flush_interval == 0
                    };
                    if flush_due {
                        results::write_json(output, &results)
                            .wrap_err("failed to flush gas results")?;
                    }
                    bar.inc(1);
                }
                Err(err) => {
                    warn!(
                        level = level.index(),
                        tx_number,
                        %err,
                        "call failed, flushing partial results before retrying"
                    );
                    results::write_json(output, &results)
                        .wrap_err("failed to flush gas results after error")?;
                    tokio::time::sleep(config.flush.retry_delay).await;
                }
            }
        }

        bar.finish_and_clear();
        let stats = results.get_mut(level);
        stats.finalize_average();
        println!("\nLevel {} completed:", level.index());
        println!("  Total Gas: {}", stats.total_gas);
        println!("  Average Gas: {:.2}", stats.avg_gas);

        // Rewrite immediately so the durable file carries the computed mean
        // while the remaining levels run.
        results::write_json(output, &results).wrap_err("failed to write gas results")?;
    }

    Ok(results)
}
