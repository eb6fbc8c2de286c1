//! Result data model shared by the workload drivers and the reporter.
//!
//! Serde field names match the JSON files the measurement scripts have
//! always produced, so existing result files keep loading.

use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path, time::Duration};

use crate::backend::Level;

/// One timed trial: `tx_count` sequential decision calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    #[serde(rename = "txCount")]
    pub tx_count: u32,
    pub repetition: u32,
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
}

/// Gas consumed by one confirmed decision call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSample {
    #[serde(rename = "txNumber")]
    pub tx_number: u32,
    #[serde(rename = "gasUsed")]
    pub gas_used: u64,
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

/// Accumulated cost-mode measurements for one level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GasLevelStats {
    pub transactions: Vec<GasSample>,
    #[serde(rename = "totalGas")]
    pub total_gas: u64,
    #[serde(rename = "avgGas")]
    pub avg_gas: f64,
}

impl GasLevelStats {
    /// Appends a sample and advances the running total.
    pub fn record(&mut self, sample: GasSample) {
        self.total_gas += sample.gas_used;
        self.transactions.push(sample);
    }

    /// Computes the mean once the level's calls are exhausted. A level with
    /// zero successful samples averages to zero rather than failing.
    pub fn finalize_average(&mut self) {
        self.avg_gas = if self.transactions.is_empty() {
            0.0
        } else {
            self.total_gas as f64 / self.transactions.len() as f64
        };
    }
}

/// Fixed map over the four escalation levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelMap<T> {
    pub level0: T,
    pub level1: T,
    pub level2: T,
    pub level3: T,
}

impl<T> LevelMap<T> {
    pub fn get(&self, level: Level) -> &T {
        match level {
            Level::Zero => &self.level0,
            Level::One => &self.level1,
            Level::Two => &self.level2,
            Level::Three => &self.level3,
        }
    }

    pub fn get_mut(&mut self, level: Level) -> &mut T {
        match level {
            Level::Zero => &mut self.level0,
            Level::One => &mut self.level1,
            Level::Two => &mut self.level2,
            Level::Three => &mut self.level3,
        }
    }

    /// Levels with their entries, in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &T)> + '_ {
        Level::ALL.into_iter().map(move |level| (level, self.get(level)))
    }
}

pub type ResponseTimeResults = LevelMap<Vec<LatencySample>>;
pub type GasResults = LevelMap<GasLevelStats>;

/// Durability policy for long cost-mode runs: how often progress is made
/// durable and how long to back off after a failed call.
#[derive(Debug, Clone, Copy)]
pub struct FlushPolicy {
    /// Successful calls between periodic flushes of the results file.
    pub flush_interval: u32,
    /// Pause after a failed call before the next submission.
    pub retry_delay: Duration,
}

impl Default for FlushPolicy {
    fn default() -> Self {
        Self {
            flush_interval: 100,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Writes `value` as pretty JSON at `path`, creating parent directories and
/// overwriting any previous content.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> eyre::Result<()> {
    use eyre::WrapErr;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let file = File::create(path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_samples_average_to_zero() {
        let mut stats = GasLevelStats::default();
        stats.finalize_average();
        assert_eq!(stats.avg_gas, 0.0);
    }

    #[test]
    fn running_total_tracks_recorded_samples() {
        let mut stats = GasLevelStats::default();
        for (i, gas) in [21000u64, 43000, 36000].into_iter().enumerate() {
            stats.record(GasSample {
                tx_number: i as u32 + 1,
                gas_used: gas,
                tx_hash: format!("0x{i:064x}"),
            });
        }
        stats.finalize_average();
        assert_eq!(stats.total_gas, 100_000);
        assert!((stats.avg_gas - 100_000.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn samples_serialize_with_script_field_names() {
        let sample = LatencySample {
            tx_count: 3,
            repetition: 1,
            response_time_ms: 812,
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["txCount"], 3);
        assert_eq!(json["responseTime"], 812);

        let mut results = GasResults::default();
        results.level2.record(GasSample {
            tx_number: 1,
            gas_used: 21000,
            tx_hash: "0xabc".to_owned(),
        });
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["level2"]["totalGas"], 21000);
        assert_eq!(json["level2"]["transactions"][0]["gasUsed"], 21000);
        assert_eq!(json["level0"]["transactions"], serde_json::json!([]));
    }

    #[test]
    fn write_json_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test-results").join("responseTime.json");
        let results = ResponseTimeResults::default();
        write_json(&path, &results).unwrap();
        let reloaded: ResponseTimeResults =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert!(reloaded.level0.is_empty());
    }
}
