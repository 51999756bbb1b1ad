//! Total spend per calendar month.

use spendlens_core::{month_of, Ledger, MonthlyTotals};

/// Sum every expense into its calendar month. Months with no expenses stay
/// at zero, so an empty ledger yields twelve zeros.
pub fn monthly_totals(ledger: &Ledger) -> MonthlyTotals {
    let mut totals = MonthlyTotals::zeroed();
    for expense in ledger.expenses() {
        totals.add(month_of(expense.date), expense.amount);
    }
    totals
}
