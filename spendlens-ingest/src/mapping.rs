//! Mapping CSV → ordered category rules.
//!
//! Layout (header row required):
//!   Key,CoreExpense,Category1,Category1Percentage,Category2,Category2Percentage,Category3,Category3Percentage
//!
//! The key is always the first column whatever its header says. `CoreExpense`
//! is core when it reads `Y` (any case). Percentages take the leading integer
//! of the cell; blank or non-numeric cells count as 0.

use anyhow::{Context, Result};
use csv::StringRecord;
use spendlens_core::{lenient_int, CategoryRule, MAX_SPLITS};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    fn new(headers: &StringRecord) -> Self {
        let mut map = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim_start_matches('\u{feff}').trim().to_lowercase();
            map.entry(name).or_insert(idx);
        }
        Self(map)
    }

    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        self.0
            .get(name)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }
}

fn percentage(raw: &str) -> u32 {
    lenient_int(raw)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

fn rule_from_record(index: &HeaderIndex, record: &StringRecord) -> Option<CategoryRule> {
    let key = record.get(0).map(str::trim).unwrap_or("");
    if key.is_empty() {
        return None;
    }

    let core = index.get(record, "coreexpense").eq_ignore_ascii_case("y");
    let mut rule = CategoryRule::new(key, core);
    for n in 1..=MAX_SPLITS {
        let category = index.get(record, &format!("category{n}"));
        let pct = percentage(index.get(record, &format!("category{n}percentage")));
        rule = rule.with_split(category, pct);
    }
    Some(rule)
}

/// Parse mapping rules from any reader, keeping row order.
pub fn parse_mapping<R: Read>(reader: R) -> Result<Vec<CategoryRule>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let index = HeaderIndex::new(rdr.headers().context("reading mapping header")?);

    let mut rules = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading mapping row {}", line + 2))?;
        match rule_from_record(&index, &record) {
            Some(rule) => {
                tracing::info!(
                    key = %rule.key,
                    core = rule.core_expense,
                    splits = ?rule.splits,
                    "mapping rule loaded"
                );
                rules.push(rule);
            }
            None if record.iter().all(|c| c.trim().is_empty()) => {}
            None => tracing::warn!(row = line + 2, "mapping row without key skipped"),
        }
    }
    Ok(rules)
}

/// Parse a mapping CSV file.
pub fn read_mapping_csv(path: impl AsRef<Path>) -> Result<Vec<CategoryRule>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_mapping(file).with_context(|| format!("parsing {}", path.display()))
}
