//! Plain-text renderings of the ledger views.

use serde::Serialize;
use spendlens_analysis::{CategoryTotals, CoreSplitTotals};
use spendlens_core::{CategoryRule, Expense, MonthlyTotals, MONTHS};
use spendlens_ingest::LoadSummary;
use std::fmt::Write;

pub fn render_monthly(totals: &MonthlyTotals) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{:<10} {:>12}", "Month", "Total");
    for (month, total) in totals.iter() {
        let _ = writeln!(s, "{:<10} {:>12.2}", month.name(), total);
    }
    let _ = writeln!(s, "{:<10} {:>12.2}", "Year", totals.total());
    s
}

pub fn render_core_split(split: &CoreSplitTotals) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:<10} {:>12} {:>12} {:>12}",
        "Month", "Core", "Non-core", "Unmapped"
    );
    for month in MONTHS {
        let _ = writeln!(
            s,
            "{:<10} {:>12.2} {:>12.2} {:>12.2}",
            month.name(),
            split.core[month],
            split.non_core[month],
            split.unmapped[month]
        );
    }
    let _ = writeln!(
        s,
        "{:<10} {:>12.2} {:>12.2} {:>12.2}",
        "Year",
        split.core.total(),
        split.non_core.total(),
        split.unmapped.total()
    );
    s
}

pub fn render_categories(totals: &CategoryTotals) -> String {
    let mut s = String::new();
    for (month, entries) in totals.iter() {
        if entries.is_empty() {
            continue;
        }
        let _ = writeln!(s, "## {}", month.name());
        for e in entries {
            let _ = writeln!(s, "  {:<24} {:>12.2}", e.category, e.total);
        }
    }
    if s.is_empty() {
        s.push_str("(no categorized spending)\n");
    }
    s
}

pub fn render_expenses(expenses: &[Expense]) -> String {
    let mut s = String::new();
    for e in expenses {
        let _ = writeln!(s, "{}  {:<40} {:>10.2}", e.date, e.description, e.amount);
    }
    let _ = writeln!(s, "{} expenses", expenses.len());
    s
}

pub fn render_rules(rules: &[CategoryRule]) -> String {
    let mut s = String::new();
    for (i, r) in rules.iter().enumerate() {
        let splits: Vec<String> = r
            .contributing_splits()
            .map(|sp| format!("{} {}%", sp.category, sp.percentage))
            .collect();
        let _ = writeln!(
            s,
            "{:>3}. {:<28} {:<8} {}",
            i + 1,
            r.key,
            if r.core_expense { "core" } else { "non-core" },
            splits.join(", ")
        );
    }
    let _ = writeln!(s, "{} rules", rules.len());
    s
}

/// Load counters plus year totals, for `spendlens summary`.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub load: &'a LoadSummary,
    pub year_total: f64,
    pub core_total: f64,
    pub non_core_total: f64,
    pub unmapped_total: f64,
}

impl<'a> Summary<'a> {
    pub fn new(load: &'a LoadSummary, monthly: &MonthlyTotals, split: &CoreSplitTotals) -> Self {
        Self {
            load,
            year_total: monthly.total(),
            core_total: split.core.total(),
            non_core_total: split.non_core.total(),
            unmapped_total: split.unmapped.total(),
        }
    }
}

pub fn render_summary(summary: &Summary<'_>) -> String {
    let l = summary.load;
    let mut s = String::new();
    let _ = writeln!(s, "Rows read:        {}", l.rows_read);
    let _ = writeln!(s, "Accepted:         {}", l.accepted);
    let _ = writeln!(s, "Exempt:           {}", l.exempt);
    let _ = writeln!(s, "Rejected:         {}", l.rejected);
    let _ = writeln!(s, "Skipped credits:  {}", l.skipped_credits);
    let _ = writeln!(s, "Exemptions:       {}", l.exemptions);
    let _ = writeln!(s, "Mapping rules:    {}", l.rules);
    for f in &l.failed_files {
        let _ = writeln!(s, "Failed file:      {}", f.display());
    }
    let _ = writeln!(s);
    let _ = writeln!(s, "Year total:       {:.2}", summary.year_total);
    let _ = writeln!(s, "  core:           {:.2}", summary.core_total);
    let _ = writeln!(s, "  non-core:       {:.2}", summary.non_core_total);
    let _ = writeln!(s, "  unmapped:       {:.2}", summary.unmapped_total);
    s
}
