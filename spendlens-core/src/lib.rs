//! spendlens-core: expense records, exemption filter, category mapping and
//! the ledger that holds them.

pub mod exemptions;
pub mod expense;
pub mod ledger;
pub mod mapping;
pub mod month;
pub mod numeric;

pub use exemptions::{is_exempt, ExemptionSet};
pub use expense::{normalize, parse_date, Expense, RawTransaction, Rejection, UnparseableAmountPolicy};
pub use ledger::Ledger;
pub use mapping::{CategoryRule, CategorySplit, MappingTable, MAX_SPLITS};
pub use month::{month_of, MonthlyTotals, MONTHS};
pub use numeric::{lenient_float, lenient_int};

pub use chrono::Month;
