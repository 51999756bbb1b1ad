//! Per-month category totals from the percentage splits of each rule.

use serde::ser::{Serialize, SerializeMap, Serializer};
use spendlens_core::{month_of, Ledger, Month, MONTHS};

/// Running total for one category within a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub category: String,
    pub total: f64,
}

/// Category totals for each of the twelve months, largest first.
///
/// Serializes as `{"January": {"Groceries": 425.0, ...}, ...}` with the
/// inner maps written in descending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    months: [Vec<CategoryAmount>; 12],
}

impl CategoryTotals {
    fn slot(month: Month) -> usize {
        month.number_from_month() as usize - 1
    }

    fn add(&mut self, month: Month, category: &str, amount: f64) {
        let entries = &mut self.months[Self::slot(month)];
        match entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.total += amount,
            None => entries.push(CategoryAmount {
                category: category.to_string(),
                total: amount,
            }),
        }
    }

    fn sort_descending(&mut self) {
        for entries in &mut self.months {
            // Stable, so ties keep first-seen order.
            entries.sort_by(|a, b| b.total.total_cmp(&a.total));
        }
    }

    /// Entries for `month`, already sorted by total descending.
    pub fn month(&self, month: Month) -> &[CategoryAmount] {
        &self.months[Self::slot(month)]
    }

    /// Total for one category in one month, if it received anything.
    pub fn get(&self, month: Month, category: &str) -> Option<f64> {
        self.month(month)
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, &[CategoryAmount])> + '_ {
        MONTHS.iter().map(move |m| (*m, self.month(*m)))
    }

    pub fn is_empty(&self) -> bool {
        self.months.iter().all(Vec::is_empty)
    }
}

struct MonthEntries<'a>(&'a [CategoryAmount]);

impl Serialize for MonthEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.category, &entry.total)?;
        }
        map.end()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MONTHS.len()))?;
        for (month, entries) in self.iter() {
            map.serialize_entry(month.name(), &MonthEntries(entries))?;
        }
        map.end()
    }
}

/// Spread each matched expense across its rule's categories.
///
/// Every split with a positive percentage receives `amount * pct / 100`;
/// percentages are applied independently, so a rule whose slots do not add
/// up to 100 under- or over-counts on purpose. Unmatched expenses are left out.
pub fn category_totals_by_month(ledger: &Ledger) -> CategoryTotals {
    let mut out = CategoryTotals::default();
    if ledger.mapping().is_empty() {
        return out;
    }

    for expense in ledger.expenses() {
        let Some(rule) = ledger.mapping().find_match(&expense.description) else {
            continue;
        };
        let month = month_of(expense.date);
        for split in rule.contributing_splits() {
            out.add(month, &split.category, split.share_of(expense.amount));
        }
    }

    out.sort_descending();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlens_core::{CategoryRule, Expense};

    fn exp(month: u32, desc: &str, amount: f64) -> Expense {
        Expense::new(NaiveDate::from_ymd_opt(2024, month, 3).unwrap(), desc, amount)
    }

    fn grocery_rule() -> CategoryRule {
        CategoryRule::new("Costco", true)
            .with_split("Groceries", 85)
            .with_split("Clothing", 10)
            .with_split("Household", 5)
    }

    #[test]
    fn test_single_expense_split() {
        let mut ledger = Ledger::new();
        ledger.set_expenses(vec![exp(1, "COSTCO WHSE #0733", 500.0)]);
        ledger.set_mapping_rules(vec![grocery_rule()]);

        let totals = category_totals_by_month(&ledger);
        let jan = totals.month(Month::January);
        assert_eq!(
            jan,
            &[
                CategoryAmount { category: "Groceries".into(), total: 425.0 },
                CategoryAmount { category: "Clothing".into(), total: 50.0 },
                CategoryAmount { category: "Household".into(), total: 25.0 },
            ]
        );
        for m in MONTHS.iter().skip(1) {
            assert!(totals.month(*m).is_empty(), "{} should be empty", m.name());
        }
    }

    #[test]
    fn test_accumulates_and_sorts() {
        let mut ledger = Ledger::new();
        ledger.set_expenses(vec![
            exp(2, "Costco", 100.0),
            exp(2, "Game Grid", 40.0),
            exp(2, "Game Grid", 80.0),
            exp(2, "Unknown Shop", 999.0),
        ]);
        ledger.set_mapping_rules(vec![
            grocery_rule(),
            CategoryRule::new("Game Grid", false).with_split("Entertainment", 100),
        ]);

        let totals = category_totals_by_month(&ledger);
        let feb = totals.month(Month::February);
        let names: Vec<_> = feb.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["Entertainment", "Groceries", "Clothing", "Household"]);
        assert_eq!(totals.get(Month::February, "Entertainment"), Some(120.0));
        for w in feb.windows(2) {
            assert!(w[0].total >= w[1].total);
        }
    }

    #[test]
    fn test_zero_percentage_slots_absent() {
        let mut ledger = Ledger::new();
        ledger.set_expenses(vec![exp(5, "Rent", 1000.0)]);
        ledger.set_mapping_rules(vec![CategoryRule::new("rent", true)
            .with_split("Housing", 100)
            .with_split("Utilities", 0)]);

        let totals = category_totals_by_month(&ledger);
        assert_eq!(totals.get(Month::May, "Housing"), Some(1000.0));
        assert_eq!(totals.get(Month::May, "Utilities"), None);
    }

    #[test]
    fn test_no_rules_is_empty() {
        let mut ledger = Ledger::new();
        ledger.set_expenses(vec![exp(1, "Costco", 10.0)]);
        assert!(category_totals_by_month(&ledger).is_empty());
    }

    #[test]
    fn test_serializes_months_and_order() {
        let mut ledger = Ledger::new();
        ledger.set_expenses(vec![exp(1, "Costco", 500.0)]);
        ledger.set_mapping_rules(vec![grocery_rule()]);

        let json = serde_json::to_string(&category_totals_by_month(&ledger)).unwrap();
        assert!(json.starts_with(
            r#"{"January":{"Groceries":425.0,"Clothing":50.0,"Household":25.0},"February":{}"#
        ));
        assert!(json.ends_with(r#""December":{}}"#));
    }
}
