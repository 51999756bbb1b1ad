//! Bank export CSV → raw transaction rows.
//!
//! Exports are expected to carry a header row with `Date`, `Description`,
//! `Debit` and `Credit` columns (any case, any order, extra columns ignored).
//! Columns that are missing simply leave the field empty; the normalizer
//! decides whether the row is usable.

use anyhow::{Context, Result};
use csv::StringRecord;
use spendlens_core::RawTransaction;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Columns {
    description: Option<usize>,
    date: Option<usize>,
    debit: Option<usize>,
    credit: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut cols = Columns::default();
        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim_start_matches('\u{feff}').trim().to_lowercase();
            let slot = match name.as_str() {
                "description" => &mut cols.description,
                "date" => &mut cols.date,
                "debit" => &mut cols.debit,
                "credit" => &mut cols.credit,
                _ => continue,
            };
            // Keep the first column when a header repeats.
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
        cols
    }

    fn cell(record: &StringRecord, idx: Option<usize>) -> Option<String> {
        idx.and_then(|i| record.get(i)).map(|s| s.to_string())
    }

    fn row(&self, record: &StringRecord) -> RawTransaction {
        RawTransaction {
            description: Self::cell(record, self.description),
            date: Self::cell(record, self.date),
            debit: Self::cell(record, self.debit),
            credit: Self::cell(record, self.credit),
        }
    }
}

/// Parse a transaction export from any reader.
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let cols = Columns::from_headers(&headers);
    if cols.description.is_none() || cols.date.is_none() {
        tracing::warn!(headers = ?headers, "export has no Description/Date column; every row will be rejected");
    }

    let mut rows = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", line + 2))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(cols.row(&record));
    }
    Ok(rows)
}

/// Parse a transaction export file.
pub fn read_transactions_csv(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_transactions(file).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_named_columns_in_any_order() {
        let csv = "\
Posted,Credit,Debit,Description,Date,Balance
x,,-45.10,COSTCO WHSE #0733,2024-01-05,100.00
x,12.00,,REFUND GAME GRID,2024-01-06,112.00
";
        let rows = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description.as_deref(), Some("COSTCO WHSE #0733"));
        assert_eq!(rows[0].date.as_deref(), Some("2024-01-05"));
        assert_eq!(rows[0].debit.as_deref(), Some("-45.10"));
        assert_eq!(rows[0].credit.as_deref(), Some(""));
        assert_eq!(rows[1].credit.as_deref(), Some("12.00"));
    }

    #[test]
    fn test_header_case_and_bom() {
        let csv = "\u{feff}DATE , description,DEBIT\n01/02/2024,Store,3.50\n";
        let rows = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].date.as_deref(), Some("01/02/2024"));
        assert_eq!(rows[0].description.as_deref(), Some("Store"));
        assert_eq!(rows[0].debit.as_deref(), Some("3.50"));
        assert_eq!(rows[0].credit, None);
    }

    #[test]
    fn test_blank_and_short_rows() {
        let csv = "Date,Description,Debit,Credit\n,,,\n2024-03-01,Short\n";
        let rows = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].debit, None);
    }

    #[test]
    fn test_missing_file_errors() {
        let err = read_transactions_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("opening"));
    }
}
