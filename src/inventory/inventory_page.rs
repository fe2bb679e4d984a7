//! Defines the route handler for the page that displays a month of inventory movements.

use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    html::render,
    inventory::{InventoryEntry, inventory_totals, view::inventory_view},
    month::{MonthQuery, filter_by_month, month_window},
};

/// The state needed to display the inventory page.
#[derive(Debug, Clone)]
pub struct InventoryPageState {
    /// The cached inventory collection.
    pub inventory: Arc<RwLock<Vec<InventoryEntry>>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for InventoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            inventory: state.inventory.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for the month-scoped inventory page.
///
/// The in/out figures are scoped to the displayed month while the running
/// stock is computed over the entire collection.
///
/// # Panics
///
/// Panics if the lock for the inventory collection is poisoned.
pub async fn get_inventory_page(
    State(state): State<InventoryPageState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let reference = match query.reference_date(&state.local_timezone) {
        Ok(reference) => reference,
        Err(error) => return error.into_response(),
    };
    let window = month_window(reference);

    let inventory = state.inventory.read().unwrap();
    let month_entries: Vec<&InventoryEntry> = filter_by_month(&inventory, window).collect();
    let totals = inventory_totals(month_entries.iter().copied(), &inventory);

    render(
        StatusCode::OK,
        inventory_view(&month_entries, totals, window),
    )
}
