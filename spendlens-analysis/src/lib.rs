//! spendlens-analysis: the three read-only aggregate views over a [`Ledger`].
//!
//! Each query walks the expense list once and shares nothing with the
//! others, so calling one twice on the same ledger gives the same answer.
//!
//! [`Ledger`]: spendlens_core::Ledger

pub mod categories;
pub mod core_split;
pub mod monthly;

pub use categories::{category_totals_by_month, CategoryAmount, CategoryTotals};
pub use core_split::{core_vs_non_core_monthly_totals, CoreSplitTotals};
pub use monthly::monthly_totals;
