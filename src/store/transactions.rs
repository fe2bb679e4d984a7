//! Store access for the petty-cash transaction collection.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    ledger::{Transaction, TransactionDraft, TransactionKind},
    store::{RecordId, StoreClient},
};

const TABLE: &str = "transactions";

/// One `transactions` row as the store serves it.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: RecordId,
    date: Date,
    detail: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: KindCode,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

/// The insert body for a new `transactions` row. The store assigns the id
/// and the creation timestamp.
#[derive(Debug, Serialize)]
struct NewTransactionRow<'a> {
    date: Date,
    detail: &'a str,
    amount: f64,
    #[serde(rename = "type")]
    kind: KindCode,
}

/// The wire coding of a transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum KindCode {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "egreso")]
    Expense,
    #[serde(rename = "comision")]
    Commission,
}

impl From<TransactionKind> for KindCode {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
            TransactionKind::Commission => Self::Commission,
        }
    }
}

impl From<KindCode> for TransactionKind {
    fn from(code: KindCode) -> Self {
        match code {
            KindCode::Income => Self::Income,
            KindCode::Expense => Self::Expense,
            KindCode::Commission => Self::Commission,
        }
    }
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            detail: row.detail,
            amount: row.amount,
            kind: row.kind.into(),
            created_at: row.created_at,
        }
    }
}

impl StoreClient {
    /// Fetch the full transaction collection, newest date first.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let rows: Vec<TransactionRow> = self
            .get_rows(TABLE, &[("select", "*"), ("order", "date.desc")])
            .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    /// Insert a new transaction and return the record as stored, including
    /// its assigned id and timestamp.
    ///
    /// # Errors
    /// Returns [Error::MissingField] or [Error::InvalidAmount] before any
    /// network call when the draft is incomplete, or the store's error when
    /// the insert fails.
    pub async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, Error> {
        draft.validate()?;

        let row = NewTransactionRow {
            date: draft.date,
            detail: &draft.detail,
            amount: draft.amount,
            kind: draft.kind.into(),
        };
        let created: TransactionRow = self.insert_row(TABLE, &row).await?;

        Ok(created.into())
    }

    /// Delete a transaction by id. See [Error::NotFound] for the
    /// already-deleted case.
    pub async fn delete_transaction(&self, id: &str) -> Result<(), Error> {
        self.delete_row(TABLE, id).await
    }
}
