//! Exemption list file: one description fragment per line.

use anyhow::{Context, Result};
use spendlens_core::ExemptionSet;
use std::path::Path;

pub fn read_exemptions(path: impl AsRef<Path>) -> Result<ExemptionSet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(ExemptionSet::parse_lines(&text))
}
