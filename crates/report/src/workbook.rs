//! XLSX workbook assembly.

use eyre::Result;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use pdp_workload::{GasLevelStats, GasResults, LatencySample, Level, ResponseTimeResults};

use crate::tables;

const HASH_COLUMN_WIDTH: f64 = 68.0;
const LABEL_COLUMN_WIDTH: f64 = 18.0;

fn header_format() -> Format {
    Format::new().set_bold()
}

/// Builds the full workbook: one latency sheet per level, the cost summary
/// and per-level cost detail sheets, or a placeholder when cost data is
/// missing.
pub fn build_workbook(
    latency: &ResponseTimeResults,
    gas: Option<&GasResults>,
) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    for (level, samples) in latency.iter() {
        workbook.push_worksheet(latency_worksheet(level, samples)?);
    }

    match gas.filter(|results| tables::has_gas_data(results)) {
        Some(results) => {
            workbook.push_worksheet(gas_summary_worksheet(results)?);
            for (level, stats) in results.iter() {
                workbook.push_worksheet(gas_detail_worksheet(level, stats)?);
            }
        }
        None => workbook.push_worksheet(gas_placeholder_worksheet()?),
    }

    Ok(workbook)
}

fn latency_worksheet(level: Level, samples: &[LatencySample]) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(format!("Level {} Response Time", level.index()))?;

    let rows = tables::latency_rows(samples);
    let repetitions = rows.iter().map(|row| row.times_ms.len()).max().unwrap_or(0);

    let header = header_format();
    worksheet.write_with_format(0, 0, "Transaction Count", &header)?;
    worksheet.set_column_width(0, LABEL_COLUMN_WIDTH)?;
    for rep in 0..repetitions {
        worksheet.write_with_format(0, rep as u16 + 1, format!("Rep {}", rep + 1), &header)?;
    }
    worksheet.write_with_format(0, repetitions as u16 + 1, "Average", &header)?;

    for (row_index, row) in rows.iter().enumerate() {
        let row_index = row_index as u32 + 1;
        worksheet.write(row_index, 0, row.tx_count)?;
        for (col, time) in row.times_ms.iter().enumerate() {
            worksheet.write(row_index, col as u16 + 1, *time)?;
        }
        worksheet.write(row_index, repetitions as u16 + 1, row.average.as_str())?;
    }

    Ok(worksheet)
}

fn gas_summary_worksheet(results: &GasResults) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Gas Consumption Summary")?;

    let header = header_format();
    for (col, caption) in [
        "Level",
        "Total Transactions",
        "Total Gas Used",
        "Average Gas per Transaction",
    ]
    .into_iter()
    .enumerate()
    {
        worksheet.write_with_format(0, col as u16, caption, &header)?;
        worksheet.set_column_width(col as u16, LABEL_COLUMN_WIDTH)?;
    }

    for (row_index, row) in tables::gas_summary_rows(results).iter().enumerate() {
        let row_index = row_index as u32 + 1;
        worksheet.write(row_index, 0, row.level.as_str())?;
        worksheet.write(row_index, 1, row.transactions as u32)?;
        worksheet.write(row_index, 2, row.total_gas)?;
        worksheet.write(row_index, 3, row.avg_gas.as_str())?;
    }

    Ok(worksheet)
}

fn gas_detail_worksheet(level: Level, stats: &GasLevelStats) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(format!("Level {} Gas Detail", level.index()))?;

    let header = header_format();
    worksheet.write_with_format(0, 0, "Transaction #", &header)?;
    worksheet.write_with_format(0, 1, "Gas Used", &header)?;
    worksheet.write_with_format(0, 2, "Transaction Hash", &header)?;
    worksheet.set_column_width(2, HASH_COLUMN_WIDTH)?;

    for (row_index, sample) in tables::gas_detail_rows(stats).iter().enumerate() {
        let row_index = row_index as u32 + 1;
        worksheet.write(row_index, 0, sample.tx_number)?;
        worksheet.write(row_index, 1, sample.gas_used)?;
        worksheet.write(row_index, 2, sample.tx_hash.as_str())?;
    }

    Ok(worksheet)
}

fn gas_placeholder_worksheet() -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Gas Consumption")?;
    worksheet.set_column_width(0, 80.0)?;
    worksheet.write_with_format(0, 0, "Gas consumption results not available", &header_format())?;
    worksheet.write(
        1,
        0,
        "Run `pdp-bench gas` to collect them; expect 12-20 hours on a public testnet.",
    )?;
    Ok(worksheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdp_workload::GasSample;

    fn latency_fixture() -> ResponseTimeResults {
        let mut results = ResponseTimeResults::default();
        for level in Level::ALL {
            for tx_count in [1u32, 2, 10] {
                for repetition in 1..=3u32 {
                    results.get_mut(level).push(LatencySample {
                        tx_count,
                        repetition,
                        response_time_ms: u64::from(tx_count) * 100,
                    });
                }
            }
        }
        results
    }

    fn gas_fixture() -> GasResults {
        let mut results = GasResults::default();
        for level in Level::ALL {
            let stats = results.get_mut(level);
            for i in 1..=5u32 {
                stats.record(GasSample {
                    tx_number: i,
                    gas_used: 40_000 + u64::from(i),
                    tx_hash: format!("0x{i:064x}"),
                });
            }
            stats.finalize_average();
        }
        results
    }

    fn sheet_names(workbook: &mut Workbook) -> Vec<String> {
        workbook
            .worksheets_mut()
            .iter()
            .map(|sheet| sheet.name())
            .collect()
    }

    #[test]
    fn full_workbook_has_nine_sheets() {
        let latency = latency_fixture();
        let gas = gas_fixture();
        let mut workbook = build_workbook(&latency, Some(&gas)).unwrap();

        let names = sheet_names(&mut workbook);
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Level 0 Response Time");
        assert_eq!(names[3], "Level 3 Response Time");
        assert_eq!(names[4], "Gas Consumption Summary");
        assert_eq!(names[5], "Level 0 Gas Detail");
        assert_eq!(names[8], "Level 3 Gas Detail");
    }

    #[test]
    fn missing_gas_data_yields_placeholder_sheet() {
        let latency = latency_fixture();
        let mut workbook = build_workbook(&latency, None).unwrap();
        let names = sheet_names(&mut workbook);
        assert_eq!(names.len(), 5);
        assert_eq!(names[4], "Gas Consumption");
    }

    #[test]
    fn empty_gas_data_also_yields_placeholder_sheet() {
        let latency = latency_fixture();
        let gas = GasResults::default();
        let mut workbook = build_workbook(&latency, Some(&gas)).unwrap();
        assert_eq!(sheet_names(&mut workbook).len(), 5);
    }

    #[test]
    fn workbook_saves_to_buffer() {
        let latency = latency_fixture();
        let gas = gas_fixture();
        let mut workbook = build_workbook(&latency, Some(&gas)).unwrap();
        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
    }
}
