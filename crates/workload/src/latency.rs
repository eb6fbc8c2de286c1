//! Latency-mode workload driver.
//!
//! For each level, transaction count and repetition, a trial submits the
//! calls strictly back-to-back (each confirmation awaited before the next
//! submission) so the timing signal is free of in-flight overlap.

use std::{path::Path, time::Instant};

use eyre::{Result, WrapErr};
use tracing::error;

use crate::{
    backend::{AccessControlBackend, DecisionRequest, Level},
    results::{self, LatencySample, ResponseTimeResults},
};

#[derive(Debug, Clone)]
pub struct LatencyConfig {
    /// Largest per-trial transaction count; trials cover `1..=max_tx`.
    pub max_tx: u32,
    /// Repetitions per transaction count.
    pub repetitions: u32,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            max_tx: 20,
            repetitions: 10,
        }
    }
}

/// Runs the full latency grid and writes the results file once at the end.
///
/// A failed repetition loses its sample but never aborts the run.
pub async fn run<B: AccessControlBackend + ?Sized>(
    backend: &B,
    request: &DecisionRequest,
    config: &LatencyConfig,
    output: &Path,
) -> Result<ResponseTimeResults> {
    let mut results = ResponseTimeResults::default();

    for level in Level::ALL {
        println!("\n========== Testing Level {} ==========", level.index());

        for tx_count in 1..=config.max_tx {
            println!("\nTesting {tx_count} transaction(s)...");

            for repetition in 1..=config.repetitions {
                let started = Instant::now();
                match run_trial(backend, level, request, tx_count).await {
                    Ok(()) => {
                        let elapsed = started.elapsed().as_millis() as u64;
                        results.get_mut(level).push(LatencySample {
                            tx_count,
                            repetition,
                            response_time_ms: elapsed,
                        });
                        println!("  Rep {repetition}: {elapsed}ms");
                    }
                    Err(err) => {
                        error!(
                            level = level.index(),
                            tx_count,
                            repetition,
                            %err,
                            "repetition failed, sample skipped"
                        );
                    }
                }
            }
        }
    }

    results::write_json(output, &results).wrap_err("failed to write response time results")?;
    Ok(results)
}

async fn run_trial<B: AccessControlBackend + ?Sized>(
    backend: &B,
    level: Level,
    request: &DecisionRequest,
    tx_count: u32,
) -> Result<()> {
    for _ in 0..tx_count {
        backend.evaluate(level, request).await?;
    }
    Ok(())
}

/// Mean response time over all of a level's samples, for the end-of-run
/// summary. `None` when the level produced no samples.
pub fn level_average_ms(samples: &[LatencySample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: u64 = samples.iter().map(|s| s.response_time_ms).sum();
    Some(total as f64 / samples.len() as f64)
}
