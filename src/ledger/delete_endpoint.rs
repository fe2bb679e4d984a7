//! Defines the endpoint for deleting a petty-cash transaction.
use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    ledger::Transaction,
    store::{RecordId, StoreClient},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The gateway to the hosted data store.
    pub store: StoreClient,
    /// The cached transaction collection.
    pub transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with an empty table
/// row on success so htmx removes the row in place.
///
/// A transaction the store no longer has is treated the same as a confirmed
/// delete for the cache (the stale row is dropped) but answers with an alert
/// asking the client to refresh.
///
/// # Panics
///
/// Panics if the lock for the transaction collection is poisoned.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<RecordId>,
) -> Response {
    match state.store.delete_transaction(&transaction_id).await {
        // The status code has to be 200 OK or HTMX will not remove the table row.
        Ok(()) => {
            remove_from_cache(&state, &transaction_id);
            Html("").into_response()
        }
        Err(Error::NotFound) => {
            remove_from_cache(&state, &transaction_id);
            Error::NotFound.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn remove_from_cache(state: &DeleteTransactionState, transaction_id: &str) {
    state
        .transactions
        .write()
        .unwrap()
        .retain(|transaction| transaction.id != transaction_id);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::{
        ledger::{TransactionKind, core::test_transaction},
        store::StoreClient,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn state_with_one_transaction(server_uri: &str) -> DeleteTransactionState {
        DeleteTransactionState {
            store: StoreClient::new(server_uri, "key"),
            transactions: Arc::new(RwLock::new(vec![test_transaction(
                "a1",
                date!(2025 - 03 - 05),
                "sale",
                100.0,
                TransactionKind::Income,
            )])),
        }
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_cached_record() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/transactions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": "a1" }])),
            )
            .mount(&server)
            .await;

        let state = state_with_one_transaction(&server.uri());

        let response =
            delete_transaction_endpoint(State(state.clone()), Path("a1".to_owned())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.transactions.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn already_deleted_record_is_dropped_from_the_cache_with_an_alert() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let state = state_with_one_transaction(&server.uri());

        let response =
            delete_transaction_endpoint(State(state.clone()), Path("a1".to_owned())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        // The stale cache entry is cleaned up even though the store had
        // nothing to delete.
        assert!(state.transactions.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failure_leaves_the_cache_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let state = state_with_one_transaction(&server.uri());

        let response =
            delete_transaction_endpoint(State(state.clone()), Path("a1".to_owned())).await;

        assert_ne!(response.status(), StatusCode::OK);
        assert_eq!(state.transactions.read().unwrap().len(), 1);
    }
}
