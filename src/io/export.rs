//! CSV export for cash-flow series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::types::CashFlowPoint;

/// Column header for cash-flow CSV export.
const HEADER: &str = "month,savings,investment,monthly_flow,accumulated_flow";

/// Exports a cash-flow series to a CSV file at the given path.
///
/// Monetary values are rounded to two decimals; the series itself keeps
/// full precision.
///
/// # Arguments
///
/// * `points` - Monthly cash-flow series, month 1 first
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_cash_flow_csv(points: &[CashFlowPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_cash_flow_csv(points, buf)
}

/// Writes a cash-flow series as CSV to any writer.
///
/// # Arguments
///
/// * `points` - Monthly cash-flow series, month 1 first
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_cash_flow_csv(points: &[CashFlowPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for p in points {
        wtr.write_record(&[
            p.month.to_string(),
            format!("{:.2}", p.savings),
            format!("{:.2}", p.investment),
            format!("{:.2}", p.monthly_flow),
            format!("{:.2}", p.accumulated_flow),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cash_flow::build_monthly_cash_flow;

    #[test]
    fn header_and_row_count() {
        let points = build_monthly_cash_flow(1000.0, 100.0, 24);
        let mut buf = Vec::new();
        write_cash_flow_csv(&points, &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.first().copied(), Some(HEADER));
        // 1 header + 24 data rows
        assert_eq!(lines.len(), 25);
    }

    #[test]
    fn first_row_carries_investment() {
        let points = build_monthly_cash_flow(1000.0, 100.0, 3);
        let mut buf = Vec::new();
        write_cash_flow_csv(&points, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][2], "1000.00");
        assert_eq!(&rows[0][3], "-900.00");
        assert_eq!(&rows[1][2], "0.00");
        assert_eq!(&rows[2][4], "-700.00");
    }

    #[test]
    fn deterministic_output() {
        let points = build_monthly_cash_flow(123.456, 7.891, 12);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_cash_flow_csv(&points, &mut buf1).ok();
        write_cash_flow_csv(&points, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
