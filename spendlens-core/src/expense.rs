//! Expense records and the normalizer that builds them from raw CSV rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exemptions::ExemptionSet;
use crate::numeric::lenient_float;

/// A normalized expense. `amount` is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

impl Expense {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount: amount.abs(),
        }
    }
}

/// One row of a bank export before validation.
///
/// Fields are kept as the raw cell text; `None` means the column was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub description: Option<String>,
    pub date: Option<String>,
    pub debit: Option<String>,
    pub credit: Option<String>,
}

impl RawTransaction {
    pub fn new(description: &str, date: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            date: Some(date.to_string()),
            debit: None,
            credit: None,
        }
    }

    pub fn with_debit(mut self, debit: &str) -> Self {
        self.debit = Some(debit.to_string());
        self
    }

    pub fn with_credit(mut self, credit: &str) -> Self {
        self.credit = Some(credit.to_string());
        self
    }

    /// True when the debit cell holds any text.
    pub fn has_debit(&self) -> bool {
        present(&self.debit).is_some()
    }
}

/// What to do with a row whose amount cells are filled but hold no usable number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnparseableAmountPolicy {
    /// Keep the row as a zero-amount expense.
    #[default]
    Zero,
    /// Drop the row.
    Reject,
}

/// Why a raw row did not become an expense.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("missing description")]
    MissingDescription,
    #[error("missing date")]
    MissingDate,
    #[error("missing debit and credit amounts")]
    MissingAmount,
    #[error("unrecognised date '{0}'")]
    InvalidDate(String),
    #[error("unparseable amount (debit {debit:?}, credit {credit:?})")]
    UnparseableAmount {
        debit: Option<String>,
        credit: Option<String>,
    },
    #[error("exempt: {0}")]
    Exempt(String),
}

impl Rejection {
    /// Exempt rows are filtered on purpose; everything else is bad input.
    pub fn is_exemption(&self) -> bool {
        matches!(self, Rejection::Exempt(_))
    }
}

// Two-digit years go before `%Y`, which would otherwise read "24" as year 24.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

/// Parse the date formats seen in bank exports. An ISO timestamp keeps its date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let s = s.split(['T', ' ']).next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Turn a raw row into an [`Expense`].
///
/// The amount is the absolute value of the first non-zero number among
/// debit then credit. Exempt descriptions are refused before any amount
/// handling.
pub fn normalize(
    raw: &RawTransaction,
    exemptions: &ExemptionSet,
    policy: UnparseableAmountPolicy,
) -> Result<Expense, Rejection> {
    let description = present(&raw.description).ok_or(Rejection::MissingDescription)?;
    let date_str = present(&raw.date).ok_or(Rejection::MissingDate)?;
    let debit = present(&raw.debit);
    let credit = present(&raw.credit);
    if debit.is_none() && credit.is_none() {
        return Err(Rejection::MissingAmount);
    }

    if exemptions.is_exempt(description) {
        return Err(Rejection::Exempt(description.to_string()));
    }

    let date = parse_date(date_str).ok_or_else(|| Rejection::InvalidDate(date_str.to_string()))?;

    let parsed = [debit, credit]
        .into_iter()
        .flatten()
        .filter_map(lenient_float)
        .find(|v| *v != 0.0);

    let amount = match (parsed, policy) {
        (Some(v), _) => v.abs(),
        (None, UnparseableAmountPolicy::Zero) => 0.0,
        (None, UnparseableAmountPolicy::Reject) => {
            // A literal zero is still a valid amount.
            let any_number = [debit, credit].into_iter().flatten().any(|s| lenient_float(s).is_some());
            if !any_number {
                return Err(Rejection::UnparseableAmount {
                    debit: debit.map(str::to_string),
                    credit: credit.map(str::to_string),
                });
            }
            0.0
        }
    };

    Ok(Expense {
        date,
        description: description.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn none() -> ExemptionSet {
        ExemptionSet::new()
    }

    #[test]
    fn test_debit_becomes_positive_amount() {
        let raw = RawTransaction::new("COSTCO WHSE #0001", "2024-01-05").with_debit("-125.40");
        let e = normalize(&raw, &none(), UnparseableAmountPolicy::Zero).unwrap();
        assert_eq!(e.date, ymd(2024, 1, 5));
        assert_eq!(e.description, "COSTCO WHSE #0001");
        assert_eq!(e.amount, 125.40);
    }

    #[test]
    fn test_credit_used_when_debit_absent_or_zero() {
        let raw = RawTransaction::new("Refund", "01/20/2024").with_credit("30.00");
        let e = normalize(&raw, &none(), UnparseableAmountPolicy::Zero).unwrap();
        assert_eq!(e.amount, 30.0);
        assert_eq!(e.date, ymd(2024, 1, 20));

        let raw = RawTransaction::new("Refund", "01/20/2024")
            .with_debit("0.00")
            .with_credit("-30.00");
        let e = normalize(&raw, &none(), UnparseableAmountPolicy::Zero).unwrap();
        assert_eq!(e.amount, 30.0);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let policy = UnparseableAmountPolicy::Zero;
        let mut raw = RawTransaction::new("", "2024-01-01").with_debit("1");
        assert_eq!(normalize(&raw, &none(), policy), Err(Rejection::MissingDescription));

        raw = RawTransaction::new("Store", "  ").with_debit("1");
        assert_eq!(normalize(&raw, &none(), policy), Err(Rejection::MissingDate));

        raw = RawTransaction::new("Store", "2024-01-01");
        assert_eq!(normalize(&raw, &none(), policy), Err(Rejection::MissingAmount));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let raw = RawTransaction::new("Store", "yesterday").with_debit("4.00");
        assert_eq!(
            normalize(&raw, &none(), UnparseableAmountPolicy::Zero),
            Err(Rejection::InvalidDate("yesterday".into()))
        );
    }

    #[test]
    fn test_unparseable_amount_policy() {
        let raw = RawTransaction::new("Store", "2024-02-02")
            .with_debit("n/a")
            .with_credit("--");
        let e = normalize(&raw, &none(), UnparseableAmountPolicy::Zero).unwrap();
        assert_eq!(e.amount, 0.0);

        let err = normalize(&raw, &none(), UnparseableAmountPolicy::Reject).unwrap_err();
        assert!(matches!(err, Rejection::UnparseableAmount { .. }));
    }

    #[test]
    fn test_literal_zero_kept_under_reject_policy() {
        let raw = RawTransaction::new("Fee reversal", "2024-02-02").with_debit("0.00");
        let e = normalize(&raw, &none(), UnparseableAmountPolicy::Reject).unwrap();
        assert_eq!(e.amount, 0.0);
    }

    #[test]
    fn test_exempt_row_dropped() {
        let exemptions = ExemptionSet::from_entries(["payment thank you"]);
        let raw = RawTransaction::new("ONLINE PAYMENT THANK YOU", "2024-03-01").with_credit("500");
        let err = normalize(&raw, &exemptions, UnparseableAmountPolicy::Zero).unwrap_err();
        assert!(err.is_exemption());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-07-04"), Some(ymd(2024, 7, 4)));
        assert_eq!(parse_date("07/04/2024"), Some(ymd(2024, 7, 4)));
        assert_eq!(parse_date("7/4/24"), Some(ymd(2024, 7, 4)));
        assert_eq!(parse_date("2024/07/04"), Some(ymd(2024, 7, 4)));
        assert_eq!(parse_date("2024-07-04T10:00:00Z"), Some(ymd(2024, 7, 4)));
        assert_eq!(parse_date("July 4"), None);
    }
}
