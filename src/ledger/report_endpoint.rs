//! Defines the endpoint that serves the monthly cash movements report.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    branding::BrandingSetting,
    ledger::{Transaction, cash_totals},
    month::{MonthQuery, filter_by_month, month_window},
    report::{self, ReportMeta, pdf_attachment_response},
    timezone::local_now,
};

/// The state needed to render the cash report.
#[derive(Debug, Clone)]
pub struct CashReportState {
    /// The cached transaction collection.
    pub transactions: Arc<RwLock<Vec<Transaction>>>,
    /// The cached branding setting.
    pub branding: Arc<RwLock<Option<BrandingSetting>>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for CashReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            branding: state.branding.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that renders the requested month's cash movements as a
/// downloadable PDF.
///
/// # Panics
///
/// Panics if the lock for the transaction collection or the branding setting
/// is poisoned.
pub async fn get_cash_report(
    State(state): State<CashReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let reference = match query.reference_date(&state.local_timezone) {
        Ok(reference) => reference,
        Err(error) => return error.into_response(),
    };
    let issued_at = match local_now(&state.local_timezone) {
        Ok(issued_at) => issued_at,
        Err(error) => return error.into_response(),
    };
    let window = month_window(reference);

    let logo = state
        .branding
        .read()
        .unwrap()
        .as_ref()
        .and_then(|branding| branding.logo.clone());
    let meta = ReportMeta {
        title: "Cash Movements".to_owned(),
        period_label: window.label(),
        issued_at,
        logo,
    };

    let transactions = state.transactions.read().unwrap();
    let month_transactions: Vec<&Transaction> = filter_by_month(&transactions, window).collect();
    let totals = cash_totals(month_transactions.iter().copied());

    match report::cash::render(&month_transactions, totals, &meta) {
        Ok(bytes) => pdf_attachment_response(&report::cash::file_name(window), bytes),
        Err(error) => {
            tracing::error!("could not render the cash report: {error}");
            error.into_response()
        }
    }
}
