//! Defines the page with the form for recording a new petty-cash transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, render},
    ledger::{
        TransactionKind,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed to display the new-transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for the page with the form for recording a transaction.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let defaults = TransactionFormDefaults {
        kind: TransactionKind::Expense,
        date: today,
        max_date: today,
    };
    let nav_bar = NavBar::new(endpoints::CASH_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "New Transaction" }

                form
                    class="space-y-4"
                    hx-post=(endpoints::TRANSACTIONS_API)
                    hx-target-error="#alert-container"
                {
                    (transaction_form_fields(&defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                }
            }
        }
    );

    render(StatusCode::OK, base("New Transaction", &content))
}
