//! Defines the endpoint for deleting an inventory movement.
use std::sync::{Arc, RwLock};

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    inventory::InventoryEntry,
    store::{RecordId, StoreClient},
};

/// The state needed to delete an inventory movement.
#[derive(Debug, Clone)]
pub struct DeleteInventoryState {
    /// The gateway to the hosted data store.
    pub store: StoreClient,
    /// The cached inventory collection.
    pub inventory: Arc<RwLock<Vec<InventoryEntry>>>,
}

impl FromRef<AppState> for DeleteInventoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            inventory: state.inventory.clone(),
        }
    }
}

/// A route handler for deleting an inventory movement, responds with an empty
/// table row on success so htmx removes the row in place.
///
/// A movement the store no longer has is treated the same as a confirmed
/// delete for the cache but answers with an alert asking the client to
/// refresh.
///
/// # Panics
///
/// Panics if the lock for the inventory collection is poisoned.
pub async fn delete_inventory_entry_endpoint(
    State(state): State<DeleteInventoryState>,
    Path(entry_id): Path<RecordId>,
) -> Response {
    match state.store.delete_inventory_entry(&entry_id).await {
        // The status code has to be 200 OK or HTMX will not remove the table row.
        Ok(()) => {
            remove_from_cache(&state, &entry_id);
            Html("").into_response()
        }
        Err(Error::NotFound) => {
            remove_from_cache(&state, &entry_id);
            Error::NotFound.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not delete inventory movement {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn remove_from_cache(state: &DeleteInventoryState, entry_id: &str) {
    state
        .inventory
        .write()
        .unwrap()
        .retain(|entry| entry.id != entry_id);
}
