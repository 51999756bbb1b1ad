//! Build a [`Ledger`] from the configured source files.
//!
//! Order matters: exemptions are read first so they filter every export,
//! then each transaction export in turn, then the mapping rules. A file that
//! cannot be read is logged and skipped unless `strict` is set.

use anyhow::{bail, Result};
use serde::Serialize;
use spendlens_core::{Ledger, UnparseableAmountPolicy};
use std::path::{Path, PathBuf};

use crate::exemptions::read_exemptions;
use crate::mapping::read_mapping_csv;
use crate::transactions::read_transactions_csv;

/// Where the data lives.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub exemptions: Option<PathBuf>,
    pub mapping: Option<PathBuf>,
    pub expenses: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Only rows with a non-empty debit cell are fed to the normalizer.
    pub debits_only: bool,
    pub amount_policy: UnparseableAmountPolicy,
    /// Abort on the first unreadable file instead of skipping it.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            debits_only: true,
            amount_policy: UnparseableAmountPolicy::Zero,
            strict: false,
        }
    }
}

/// Counters for one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub accepted: usize,
    pub exempt: usize,
    pub rejected: usize,
    pub skipped_credits: usize,
    pub exemptions: usize,
    pub rules: usize,
    pub failed_files: Vec<PathBuf>,
}

impl LoadSummary {
    fn fail(&mut self, path: &Path, err: anyhow::Error, strict: bool) -> Result<()> {
        if strict {
            return Err(err);
        }
        tracing::error!(path = %path.display(), error = %format!("{err:#}"), "failed to load file");
        self.failed_files.push(path.to_path_buf());
        Ok(())
    }
}

pub fn load_ledger(sources: &Sources, options: &LoadOptions) -> Result<(Ledger, LoadSummary)> {
    let mut ledger = Ledger::new().with_amount_policy(options.amount_policy);
    let mut summary = LoadSummary::default();

    if let Some(path) = &sources.exemptions {
        match read_exemptions(path) {
            Ok(set) => {
                summary.exemptions = set.len();
                ledger.set_exemption_set(set);
            }
            Err(e) => summary.fail(path, e, options.strict)?,
        }
    }

    for path in &sources.expenses {
        let rows = match read_transactions_csv(path) {
            Ok(rows) => rows,
            Err(e) => {
                summary.fail(path, e, options.strict)?;
                continue;
            }
        };

        let before = summary.accepted;
        for row in &rows {
            summary.rows_read += 1;
            if options.debits_only && !row.has_debit() {
                summary.skipped_credits += 1;
                continue;
            }
            match ledger.add_expense(row) {
                Ok(_) => summary.accepted += 1,
                Err(r) if r.is_exemption() => summary.exempt += 1,
                Err(_) => summary.rejected += 1,
            }
        }
        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            accepted = summary.accepted - before,
            "transaction file loaded"
        );
    }

    if let Some(path) = &sources.mapping {
        match read_mapping_csv(path) {
            Ok(rules) => {
                summary.rules = rules.len();
                ledger.set_mapping_rules(rules);
            }
            Err(e) => summary.fail(path, e, options.strict)?,
        }
    }

    if options.strict && sources.expenses.is_empty() {
        bail!("no transaction files configured");
    }

    tracing::info!(
        accepted = summary.accepted,
        exempt = summary.exempt,
        rejected = summary.rejected,
        skipped_credits = summary.skipped_credits,
        rules = summary.rules,
        "data load complete"
    );
    Ok((ledger, summary))
}
