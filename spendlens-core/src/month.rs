//! Calendar-month bucketing with fixed English month names.

use chrono::{Datelike, Month, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::{Index, IndexMut};

/// January through December.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Month of a date. Names come from `chrono::Month::name`, which does not
/// depend on the process locale.
pub fn month_of(date: NaiveDate) -> Month {
    MONTHS[date.month0() as usize]
}

fn slot(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

/// One running sum per calendar month, always all twelve.
///
/// Serializes as a map `{"January": .., ..., "December": ..}` in calendar order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyTotals {
    totals: [f64; 12],
}

impl MonthlyTotals {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn add(&mut self, month: Month, amount: f64) {
        self.totals[slot(month)] += amount;
    }

    pub fn get(&self, month: Month) -> f64 {
        self.totals[slot(month)]
    }

    /// Sum over the whole year.
    pub fn total(&self) -> f64 {
        self.totals.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.totals.iter().all(|v| *v == 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        MONTHS.iter().map(move |m| (*m, self.get(*m)))
    }
}

impl Index<Month> for MonthlyTotals {
    type Output = f64;

    fn index(&self, month: Month) -> &f64 {
        &self.totals[slot(month)]
    }
}

impl IndexMut<Month> for MonthlyTotals {
    fn index_mut(&mut self, month: Month) -> &mut f64 {
        &mut self.totals[slot(month)]
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MONTHS.len()))?;
        for (month, total) in self.iter() {
            map.serialize_entry(month.name(), &total)?;
        }
        map.end()
    }
}
