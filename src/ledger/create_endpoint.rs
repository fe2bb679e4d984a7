//! Defines the endpoint for recording a new petty-cash transaction.
use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, endpoints,
    ledger::{Transaction, TransactionDraft, TransactionKind},
    month::month_window,
    store::StoreClient,
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The gateway to the hosted data store.
    pub store: StoreClient,
    /// The cached transaction collection.
    pub transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub detail: String,
    /// The positive magnitude of the transaction.
    pub amount: f64,
    /// Whether the money came in, went out, or was collected as commission.
    pub kind: TransactionKind,
}

/// A route handler for recording a new transaction.
///
/// The store is asked first; only once it confirms the insert is the cached
/// collection updated (new records are prepended, matching the store's
/// date-descending order on reload). On success the client is redirected to
/// the ledger page for the transaction's month.
///
/// # Panics
///
/// Panics if the lock for the transaction collection is poisoned.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> impl IntoResponse {
    let draft = TransactionDraft::new(form.date, &form.detail, form.amount, form.kind);

    let created = match state.store.create_transaction(&draft).await {
        Ok(created) => created,
        Err(error) => {
            tracing::error!("could not record transaction {draft:?}: {error}");
            return error.into_alert_response();
        }
    };

    let month = month_window(created.date).query_value();
    state.transactions.write().unwrap().insert(0, created);

    (
        HxRedirect(format!("{}?month={month}", endpoints::CASH_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
