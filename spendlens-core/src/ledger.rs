//! The in-memory dataset every query reads: expenses, exemptions and
//! mapping rules. Built once by the loader, then shared read-only.

use crate::exemptions::ExemptionSet;
use crate::expense::{normalize, Expense, RawTransaction, Rejection, UnparseableAmountPolicy};
use crate::mapping::{CategoryRule, MappingTable};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    expenses: Vec<Expense>,
    exemptions: ExemptionSet,
    rules: MappingTable,
    amount_policy: UnparseableAmountPolicy,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amount_policy(mut self, policy: UnparseableAmountPolicy) -> Self {
        self.amount_policy = policy;
        self
    }

    /// Replace the expense list wholesale.
    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        tracing::info!(count = expenses.len(), "expense data set");
        self.expenses = expenses;
    }

    /// Replace the exemption list wholesale. Already-accepted expenses are kept.
    pub fn set_exemptions<I, S>(&mut self, exemptions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exemptions = ExemptionSet::from_entries(exemptions);
        tracing::info!(fragments = ?self.exemptions.fragments(), "exemptions set");
    }

    pub fn set_exemption_set(&mut self, exemptions: ExemptionSet) {
        tracing::info!(fragments = ?exemptions.fragments(), "exemptions set");
        self.exemptions = exemptions;
    }

    /// Append exemption fragments to the current list.
    pub fn add_exemptions<I, S>(&mut self, exemptions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exemptions.extend(exemptions);
    }

    /// Replace the mapping rules wholesale, keeping their order.
    pub fn set_mapping_rules(&mut self, rules: Vec<CategoryRule>) {
        tracing::info!(count = rules.len(), "mapping rules set");
        self.rules = MappingTable::from_rules(rules);
    }

    pub fn add_rule(&mut self, rule: CategoryRule) {
        self.rules.add_rule(rule);
    }

    /// Normalize a raw row against the current exemptions and append it.
    ///
    /// Rejected rows are logged here; the caller only needs the outcome for
    /// bookkeeping.
    pub fn add_expense(&mut self, raw: &RawTransaction) -> Result<&Expense, Rejection> {
        match normalize(raw, &self.exemptions, self.amount_policy) {
            Ok(expense) => {
                tracing::debug!(
                    date = %expense.date,
                    description = %expense.description,
                    amount = expense.amount,
                    "expense accepted"
                );
                self.expenses.push(expense);
                Ok(&self.expenses[self.expenses.len() - 1])
            }
            Err(rejection) => {
                if rejection.is_exemption() {
                    tracing::info!(%rejection, "expense skipped");
                } else {
                    tracing::warn!(%rejection, ?raw, "invalid expense row");
                }
                Err(rejection)
            }
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn exemptions(&self) -> &ExemptionSet {
        &self.exemptions
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.rules
    }

    pub fn rules(&self) -> &[CategoryRule] {
        self.rules.rules()
    }

    pub fn amount_policy(&self) -> UnparseableAmountPolicy {
        self.amount_policy
    }
}
