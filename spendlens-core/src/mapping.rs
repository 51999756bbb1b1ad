//! Category mapping rules keyed by description substring.

use serde::{Deserialize, Serialize};

/// Number of (category, percentage) slots a rule carries.
pub const MAX_SPLITS: usize = 3;

/// One category slot of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySplit {
    pub category: String,
    /// Share of the expense, out of 100. Zero contributes nothing.
    pub percentage: u32,
}

impl CategorySplit {
    pub fn contributes(&self) -> bool {
        self.percentage > 0 && !self.category.trim().is_empty()
    }

    /// Portion of `amount` that goes to this category.
    pub fn share_of(&self, amount: f64) -> f64 {
        amount * f64::from(self.percentage) / 100.0
    }
}

/// A mapping rule. Percentages are independent of each other and need not
/// add up to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub key: String,
    pub core_expense: bool,
    pub splits: Vec<CategorySplit>,
}

impl CategoryRule {
    pub fn new(key: impl Into<String>, core_expense: bool) -> Self {
        Self {
            key: key.into(),
            core_expense,
            splits: Vec::new(),
        }
    }

    /// Add a category slot. Slots beyond [`MAX_SPLITS`] are ignored.
    pub fn with_split(mut self, category: impl Into<String>, percentage: u32) -> Self {
        if self.splits.len() < MAX_SPLITS {
            self.splits.push(CategorySplit {
                category: category.into(),
                percentage,
            });
        }
        self
    }

    /// Case-insensitive substring test against a description.
    /// A blank key matches nothing.
    pub fn matches(&self, description: &str) -> bool {
        let key = self.key.trim().to_lowercase();
        !key.is_empty() && description.to_lowercase().contains(&key)
    }

    /// Splits with a strictly positive percentage.
    pub fn contributing_splits(&self) -> impl Iterator<Item = &CategorySplit> {
        self.splits.iter().filter(|s| s.contributes())
    }
}

/// Ordered rule list. Lookup is a linear first-match scan; rule sets are
/// small enough that indexing them is not worth it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    rules: Vec<CategoryRule>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn add_rule(&mut self, rule: CategoryRule) {
        tracing::debug!(
            key = %rule.key,
            core = rule.core_expense,
            splits = ?rule.splits,
            "mapping rule added"
        );
        self.rules.push(rule);
    }

    /// First rule, in insertion order, whose key occurs in `description`.
    /// Earlier rules shadow later ones even when a later key is longer.
    pub fn find_match(&self, description: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.matches(description))
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
