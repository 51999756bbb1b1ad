//! Core / non-core / unmapped spend per month.

use serde::Serialize;
use spendlens_core::{month_of, Ledger, MonthlyTotals};

/// Three month-keyed totals that partition every expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSplitTotals {
    pub core: MonthlyTotals,
    pub non_core: MonthlyTotals,
    pub unmapped: MonthlyTotals,
}

/// Route each expense by its first matching rule: core, non-core, or
/// unmapped when nothing matches.
///
/// Without expenses or without any rules loaded the result is all zeros and
/// no matching is attempted.
pub fn core_vs_non_core_monthly_totals(ledger: &Ledger) -> CoreSplitTotals {
    let mut out = CoreSplitTotals::default();
    if ledger.expenses().is_empty() || ledger.mapping().is_empty() {
        tracing::debug!(
            expenses = ledger.expenses().len(),
            rules = ledger.mapping().len(),
            "core split skipped: no data"
        );
        return out;
    }

    for expense in ledger.expenses() {
        let month = month_of(expense.date);
        match ledger.mapping().find_match(&expense.description) {
            Some(rule) if rule.core_expense => out.core.add(month, expense.amount),
            Some(_) => out.non_core.add(month, expense.amount),
            None => {
                tracing::info!(
                    description = %expense.description,
                    amount = expense.amount,
                    "unmapped expense"
                );
                out.unmapped.add(month, expense.amount);
            }
        }
    }
    out
}
