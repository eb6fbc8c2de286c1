//! Result aggregation and xlsx export.
//!
//! Reads the two measurement files the workload drivers produce and renders
//! the multi-sheet workbook. No network I/O happens here: the only failure
//! modes are missing or malformed inputs, which abort the export with a
//! message naming the prerequisite step.

pub mod tables;
pub mod workbook;

use std::path::Path;

use eyre::{Result, WrapErr};

use pdp_workload::{GasResults, ResponseTimeResults};

pub use workbook::build_workbook;

/// Which cost sheets the export wrote alongside the four latency sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasSheets {
    /// The summary sheet plus one detail sheet per level.
    Full,
    /// The single placeholder sheet; no cost data was available.
    Placeholder,
}

/// Loads the latency results; these are a hard prerequisite of the export.
pub fn load_response_times(path: &Path) -> Result<ResponseTimeResults> {
    let bytes = std::fs::read(path).wrap_err_with(|| {
        format!(
            "response time results not found at {}; run `pdp-bench response-time` first",
            path.display()
        )
    })?;
    serde_json::from_slice(&bytes)
        .wrap_err_with(|| format!("malformed response time results at {}", path.display()))
}

/// Loads the gas results when present. An absent file is not an error; the
/// workbook gets a placeholder sheet instead.
pub fn load_gas_results(path: &Path) -> Result<Option<GasResults>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)
        .wrap_err_with(|| format!("failed to read gas results at {}", path.display()))?;
    let results = serde_json::from_slice(&bytes)
        .wrap_err_with(|| format!("malformed gas results at {}", path.display()))?;
    Ok(Some(results))
}

/// Renders both result files into the workbook at `output`, overwriting any
/// previous version. The workbook is written once, at the end. Returns which
/// cost sheets actually landed in the file.
pub fn export(response_time_path: &Path, gas_path: &Path, output: &Path) -> Result<GasSheets> {
    let latency = load_response_times(response_time_path)?;
    let gas = load_gas_results(gas_path)?;

    let gas_sheets = match gas.as_ref() {
        Some(results) if tables::has_gas_data(results) => GasSheets::Full,
        _ => GasSheets::Placeholder,
    };
    let mut workbook = build_workbook(&latency, gas.as_ref())?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
    }
    workbook
        .save(output)
        .wrap_err_with(|| format!("failed to write workbook at {}", output.display()))?;
    Ok(gas_sheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdp_workload::LatencySample;

    #[test]
    fn export_writes_a_workbook_and_tolerates_missing_gas_file() {
        let dir = tempfile::tempdir().unwrap();
        let latency_path = dir.path().join("responseTime.json");
        let gas_path = dir.path().join("gasConsumption.json");
        let output = dir.path().join("out").join("results.xlsx");

        let mut latency = ResponseTimeResults::default();
        latency.level0.push(LatencySample {
            tx_count: 1,
            repetition: 1,
            response_time_ms: 250,
        });
        std::fs::write(&latency_path, serde_json::to_vec(&latency).unwrap()).unwrap();

        let gas_sheets = export(&latency_path, &gas_path, &output).unwrap();
        assert!(output.exists());
        assert_eq!(gas_sheets, GasSheets::Placeholder);
    }

    #[test]
    fn export_reports_full_cost_sheets_when_gas_data_is_present() {
        use pdp_workload::GasSample;

        let dir = tempfile::tempdir().unwrap();
        let latency_path = dir.path().join("responseTime.json");
        let gas_path = dir.path().join("gasConsumption.json");
        let output = dir.path().join("results.xlsx");

        let mut latency = ResponseTimeResults::default();
        latency.level0.push(LatencySample {
            tx_count: 1,
            repetition: 1,
            response_time_ms: 250,
        });
        std::fs::write(&latency_path, serde_json::to_vec(&latency).unwrap()).unwrap();

        let mut gas = GasResults::default();
        gas.level0.record(GasSample {
            tx_number: 1,
            gas_used: 21_000,
            tx_hash: "0x1".to_owned(),
        });
        gas.level0.finalize_average();
        std::fs::write(&gas_path, serde_json::to_vec(&gas).unwrap()).unwrap();

        let gas_sheets = export(&latency_path, &gas_path, &output).unwrap();
        assert_eq!(gas_sheets, GasSheets::Full);
    }

    #[test]
    fn missing_latency_file_aborts_with_prerequisite_message() {
        let dir = tempfile::tempdir().unwrap();
        let err = export(
            &dir.path().join("responseTime.json"),
            &dir.path().join("gasConsumption.json"),
            &dir.path().join("results.xlsx"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("response-time"));
    }

    #[test]
    fn malformed_latency_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let latency_path = dir.path().join("responseTime.json");
        std::fs::write(&latency_path, b"{").unwrap();
        let err = load_response_times(&latency_path).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
