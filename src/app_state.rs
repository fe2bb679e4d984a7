//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, RwLock};

use crate::{
    Error, branding::BrandingSetting, inventory::InventoryEntry, ledger::Transaction,
    store::StoreClient,
};

/// The state shared by all route handlers.
///
/// The three collections are client-side caches of the hosted data store:
/// loaded in full at startup, and mutated only after the store has confirmed
/// the corresponding write. A crash between a confirmed write and the cache
/// update leaves the cache stale until the next start; there is no
/// reconciliation beyond the full reload.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The gateway to the hosted data store.
    pub store: StoreClient,

    /// The petty-cash transaction collection, newest date first.
    pub transactions: Arc<RwLock<Vec<Transaction>>>,

    /// The inventory movement collection, newest date first.
    pub inventory: Arc<RwLock<Vec<InventoryEntry>>>,

    /// The singleton branding setting, if one has been written.
    pub branding: Arc<RwLock<Option<BrandingSetting>>>,

    /// The local timezone as a canonical timezone name, e.g. "America/Tegucigalpa".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] by fetching all three collections from the store.
    ///
    /// # Errors
    /// Returns the store's error if any of the fetches fail; the server
    /// should not start with partially loaded collections.
    pub async fn load(store: StoreClient, local_timezone: &str) -> Result<Self, Error> {
        let transactions = store.list_transactions().await?;
        let inventory = store.list_inventory().await?;
        let branding = store.get_branding().await?;

        Ok(Self::with_collections(
            store,
            transactions,
            inventory,
            branding,
            local_timezone,
        ))
    }

    /// Build a state from already-loaded collections.
    pub fn with_collections(
        store: StoreClient,
        transactions: Vec<Transaction>,
        inventory: Vec<InventoryEntry>,
        branding: Option<BrandingSetting>,
        local_timezone: &str,
    ) -> Self {
        Self {
            store,
            transactions: Arc::new(RwLock::new(transactions)),
            inventory: Arc::new(RwLock::new(inventory)),
            branding: Arc::new(RwLock::new(branding)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
