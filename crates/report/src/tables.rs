//! Table shaping for the workbook, independent of any xlsx concerns.
//!
//! Everything here is deterministic over its inputs, so re-running the
//! export on unchanged result files reproduces the same rows in the same
//! order.

use std::collections::BTreeMap;

use pdp_workload::{GasLevelStats, GasResults, GasSample, LatencySample};

/// Detail sheets carry at most this many samples per level.
pub const GAS_DETAIL_CAP: usize = 100;

/// One row of a latency sheet: a transaction count with its repetition
/// timings and the formatted mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyRow {
    pub tx_count: u32,
    pub times_ms: Vec<u64>,
    pub average: String,
}

/// Groups samples by transaction count, ascending numerically, preserving
/// repetition order within each group.
pub fn latency_rows(samples: &[LatencySample]) -> Vec<LatencyRow> {
    let mut grouped: BTreeMap<u32, Vec<u64>> = BTreeMap::new();
    for sample in samples {
        grouped
            .entry(sample.tx_count)
            .or_default()
            .push(sample.response_time_ms);
    }

    grouped
        .into_iter()
        .map(|(tx_count, times_ms)| {
            let average = format_mean(&times_ms);
            LatencyRow {
                tx_count,
                times_ms,
                average,
            }
        })
        .collect()
}

fn format_mean(times: &[u64]) -> String {
    let mean = times.iter().sum::<u64>() as f64 / times.len() as f64;
    format!("{mean:.2}")
}

/// One row of the cost summary sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasSummaryRow {
    pub level: String,
    pub transactions: usize,
    pub total_gas: u64,
    /// Formatted mean, or `N/A` for a level without samples.
    pub avg_gas: String,
}

pub fn gas_summary_rows(results: &GasResults) -> Vec<GasSummaryRow> {
    results
        .iter()
        .map(|(level, stats)| GasSummaryRow {
            level: format!("Level {}", level.index()),
            transactions: stats.transactions.len(),
            total_gas: stats.total_gas,
            avg_gas: if stats.transactions.is_empty() {
                "N/A".to_owned()
            } else {
                format!("{:.2}", stats.avg_gas)
            },
        })
        .collect()
}

/// The first [`GAS_DETAIL_CAP`] samples of a level, in submission order.
pub fn gas_detail_rows(stats: &GasLevelStats) -> &[GasSample] {
    let cap = stats.transactions.len().min(GAS_DETAIL_CAP);
    &stats.transactions[..cap]
}

/// Whether any level holds at least one cost sample.
pub fn has_gas_data(results: &GasResults) -> bool {
    results.iter().any(|(_, stats)| !stats.transactions.is_empty())
}
