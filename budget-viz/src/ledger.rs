//! Host-side bookkeeping that feeds the animator: totals from transaction
//! history, and the totals/trigger pair for each newly recorded entry.

use crate::budget_metrics::fill_percent;
use crate::types::{BudgetTotals, Trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    LoanTaken,
    Debit,
    LoanRepayment,
    /// Any other record type; does not count toward the totals.
    Other,
}

impl TransactionKind {
    /// Maps the backend's `type` field.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "income" => TransactionKind::Income,
            "loanTaken" => TransactionKind::LoanTaken,
            "debit" => TransactionKind::Debit,
            "loanRepayment" => TransactionKind::LoanRepayment,
            _ => TransactionKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: f32,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: f32) -> Self {
        Self { kind, amount }
    }

    /// Builds a transaction from the backend's textual fields. Amounts that
    /// do not parse count as zero.
    pub fn from_fields(tag: &str, amount: &str) -> Self {
        Self::new(TransactionKind::from_tag(tag), parse_amount(amount))
    }
}

pub fn parse_amount(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

impl BudgetTotals {
    /// Sums a transaction history: income and loans taken on one side,
    /// debits and loan repayments on the other.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(BudgetTotals::default(), |mut totals, tx| {
                match tx.kind {
                    TransactionKind::Income | TransactionKind::LoanTaken => {
                        totals.total_income += tx.amount
                    }
                    TransactionKind::Debit | TransactionKind::LoanRepayment => {
                        totals.total_expense += tx.amount
                    }
                    TransactionKind::Other => {}
                }
                totals
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanDirection {
    Taken,
    Repaid,
}

/// Figures shown next to the arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub total_income: f32,
    pub total_expense: f32,
    pub remaining: f32,
    pub remaining_percent: f32,
}

impl From<BudgetTotals> for BudgetSummary {
    fn from(totals: BudgetTotals) -> Self {
        Self {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            remaining: totals.remaining(),
            remaining_percent: fill_percent(&totals),
        }
    }
}

/// Running totals for a dashboard. Recording income or an expense returns
/// the trigger to hand to the animator together with the new totals; loans
/// move the totals silently.
#[derive(Debug, Clone, Default)]
pub struct BudgetLedger {
    totals: BudgetTotals,
}

impl BudgetLedger {
    pub fn new(totals: BudgetTotals) -> Self {
        Self { totals }
    }

    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        Self::new(BudgetTotals::from_transactions(transactions))
    }

    pub fn totals(&self) -> BudgetTotals {
        self.totals
    }

    pub fn summary(&self) -> BudgetSummary {
        self.totals.into()
    }

    /// Adds income recorded at `at_ms`. Non-positive amounts leave the
    /// totals alone and produce no trigger.
    pub fn record_income(&mut self, amount: f32, at_ms: u64) -> Option<Trigger> {
        let trigger = Trigger::income(amount, at_ms);
        if !trigger.has_valid_amount() {
            return None;
        }
        self.totals.total_income += amount;
        Some(trigger)
    }

    pub fn record_expense(&mut self, amount: f32, at_ms: u64) -> Option<Trigger> {
        let trigger = Trigger::expense(amount, at_ms);
        if !trigger.has_valid_amount() {
            return None;
        }
        self.totals.total_expense += amount;
        Some(trigger)
    }

    pub fn record_loan(&mut self, direction: LoanDirection, amount: f32) {
        if !(amount.is_finite() && amount > 0.0) {
            return;
        }
        match direction {
            LoanDirection::Taken => self.totals.total_income += amount,
            LoanDirection::Repaid => self.totals.total_expense += amount,
        }
    }

    /// Replaces the totals, e.g. after re-fetching the history.
    pub fn reset(&mut self, totals: BudgetTotals) {
        self.totals = totals;
    }
}
