//! Defines the core data models and monthly totals for the petty-cash ledger.

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{Error, month::Dated, store::RecordId};

/// One petty-cash movement: money put into or taken out of the cash box.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The store-assigned id of the transaction.
    pub id: RecordId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub detail: String,
    /// The amount of money moved, always a positive magnitude.
    ///
    /// The sign is derived from [Transaction::kind] when displaying or
    /// totalling, never stored.
    pub amount: f64,
    /// Whether money came in, went out, or was collected as commission.
    pub kind: TransactionKind,
    /// When the store recorded the transaction.
    pub created_at: Option<OffsetDateTime>,
}

impl Transaction {
    /// The amount with the sign implied by the transaction kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income | TransactionKind::Commission => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl Dated for Transaction {
    fn date(&self) -> Date {
        self.date
    }
}

/// The kind of a petty-cash transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Commission,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Commission => "Commission",
        }
    }
}

/// A transaction as entered in the create form, before the store has assigned
/// an id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: Date,
    pub detail: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    /// Build a draft, normalising the amount to two decimal places.
    pub fn new(date: Date, detail: &str, amount: f64, kind: TransactionKind) -> Self {
        Self {
            date,
            detail: detail.trim().to_owned(),
            amount: (amount * 100.0).round() / 100.0,
            kind,
        }
    }

    /// Check the required fields before the draft is submitted to the store.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if the detail text is blank, or
    /// [Error::InvalidAmount] if the amount is negative or not finite.
    pub fn validate(&self) -> Result<(), Error> {
        if self.detail.is_empty() {
            return Err(Error::MissingField("detail"));
        }

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(())
    }
}

/// Per-kind sums over one month's transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CashTotals {
    pub income: f64,
    pub expense: f64,
    pub commission: f64,
}

impl CashTotals {
    /// Income minus expense.
    ///
    /// Commission is reported on its own and is not netted into the balance;
    /// the balance keeps the meaning it had before the commission kind was
    /// introduced.
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Sum amounts separately per kind. An empty input yields all-zero totals.
pub fn cash_totals<'a, I>(transactions: I) -> CashTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = CashTotals::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => totals.income += transaction.amount,
            TransactionKind::Expense => totals.expense += transaction.amount,
            TransactionKind::Commission => totals.commission += transaction.amount,
        }
    }

    totals
}

#[cfg(test)]
pub(crate) fn test_transaction(
    id: &str,
    date: Date,
    detail: &str,
    amount: f64,
    kind: TransactionKind,
) -> Transaction {
    Transaction {
        id: id.to_owned(),
        date,
        detail: detail.to_owned(),
        amount,
        kind,
        created_at: None,
    }
}
