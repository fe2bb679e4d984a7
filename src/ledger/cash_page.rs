//! Defines the route handler for the page that displays a month of the cash ledger.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    html::render,
    ledger::{Transaction, cash_totals, view::cash_view},
    month::{MonthQuery, filter_by_month, month_window},
};

/// The state needed to display the cash ledger page.
#[derive(Debug, Clone)]
pub struct CashPageState {
    /// The cached transaction collection.
    pub transactions: Arc<RwLock<Vec<Transaction>>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for CashPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for the month-scoped cash ledger page.
///
/// # Panics
///
/// Panics if the lock for the transaction collection is poisoned.
pub async fn get_cash_page(
    State(state): State<CashPageState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let reference = match query.reference_date(&state.local_timezone) {
        Ok(reference) => reference,
        Err(error) => return error.into_response(),
    };
    let window = month_window(reference);

    let transactions = state.transactions.read().unwrap();
    let month_transactions: Vec<&Transaction> = filter_by_month(&transactions, window).collect();
    let totals = cash_totals(month_transactions.iter().copied());

    render(
        StatusCode::OK,
        cash_view(&month_transactions, totals, window),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        ledger::{TransactionKind, core::test_transaction},
        month::MonthQuery,
    };

    use super::{CashPageState, get_cash_page};

    async fn response_body(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn shows_only_the_requested_month() {
        let state = CashPageState {
            transactions: Arc::new(RwLock::new(vec![
                test_transaction(
                    "a1",
                    date!(2025 - 03 - 05),
                    "march sale",
                    100.0,
                    TransactionKind::Income,
                ),
                test_transaction(
                    "b2",
                    date!(2025 - 04 - 01),
                    "april rent",
                    50.0,
                    TransactionKind::Expense,
                ),
            ])),
            local_timezone: "Pacific/Auckland".to_owned(),
        };
        let query = MonthQuery {
            month: Some("2025-03".to_owned()),
        };

        let response = get_cash_page(State(state), Query(query)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_body(response).await;
        assert!(body.contains("march sale"));
        assert!(!body.contains("april rent"));
    }

    #[tokio::test]
    async fn garbage_month_parameter_renders_an_error_page() {
        let state = CashPageState {
            transactions: Arc::new(RwLock::new(vec![])),
            local_timezone: "Pacific/Auckland".to_owned(),
        };
        let query = MonthQuery {
            month: Some("not-a-month".to_owned()),
        };

        let response = get_cash_page(State(state), Query(query)).await;

        assert_ne!(response.status(), StatusCode::OK);
    }
}
