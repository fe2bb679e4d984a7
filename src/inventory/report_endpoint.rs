//! Defines the endpoint that serves the monthly inventory movements report.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    branding::BrandingSetting,
    inventory::{InventoryEntry, inventory_totals},
    month::{MonthQuery, filter_by_month, month_window},
    report::{self, ReportMeta, pdf_attachment_response},
    timezone::local_now,
};

/// The state needed to render the inventory report.
#[derive(Debug, Clone)]
pub struct InventoryReportState {
    /// The cached inventory collection.
    pub inventory: Arc<RwLock<Vec<InventoryEntry>>>,
    /// The cached branding setting.
    pub branding: Arc<RwLock<Option<BrandingSetting>>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for InventoryReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            inventory: state.inventory.clone(),
            branding: state.branding.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that renders the requested month's inventory movements as
/// a downloadable PDF.
///
/// # Panics
///
/// Panics if the lock for the inventory collection or the branding setting is
/// poisoned.
pub async fn get_inventory_report(
    State(state): State<InventoryReportState>,
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
        title: "Inventory Movements".to_owned(),
        period_label: window.label(),
        issued_at,
        logo,
    };

    let inventory = state.inventory.read().unwrap();
    let month_entries: Vec<&InventoryEntry> = filter_by_month(&inventory, window).collect();
    let totals = inventory_totals(month_entries.iter().copied(), &inventory);

    match report::inventory::render(&month_entries, totals, &meta) {
        Ok(bytes) => pdf_attachment_response(&report::inventory::file_name(window), bytes),
        Err(error) => {
            tracing::error!("could not render the inventory report: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{
        extract::{Query, State},
        http::{StatusCode, header},
    };
    use time::macros::date;

    use crate::{
        inventory::{Movement, Product, core::test_entry},
        month::MonthQuery,
    };

    use super::{InventoryReportState, get_inventory_report};

    #[tokio::test]
    async fn serves_a_pdf_attachment_named_after_the_month() {
        let state = InventoryReportState {
            inventory: Arc::new(RwLock::new(vec![test_entry(
                "m1",
                date!(2025 - 02 - 15),
                Product::Standard,
                5,
                Movement::Inbound,
            )])),
            branding: Arc::new(RwLock::new(None)),
            local_timezone: "Pacific/Auckland".to_owned(),
        };
        let query = MonthQuery {
            month: Some("2025-02".to_owned()),
        };

        let response = get_inventory_report(State(state), Query(query)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"inventory-report-2025-02.pdf\""
        );
    }
}
