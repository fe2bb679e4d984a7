//! The gateway between the in-memory collections and the hosted data store.
//!
//! The store exposes one REST row endpoint per collection. Everything that
//! knows about the wire shape (string-coded enums, column names, ISO dates)
//! lives in this module; the rest of the crate only sees the domain types.

mod client;
mod inventory;
mod settings;
mod transactions;

pub use client::{StoreClient, StoreErrorPayload};

/// A store-assigned record identifier.
pub type RecordId = String;
