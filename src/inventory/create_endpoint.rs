//! Defines the endpoint for recording a new inventory movement.
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
    AppState, Error, endpoints,
    inventory::{InventoryDraft, InventoryEntry, Movement, OutboundReason, Product},
    month::month_window,
    store::StoreClient,
};

/// The state needed to record an inventory movement.
#[derive(Debug, Clone)]
pub struct CreateInventoryState {
    /// The gateway to the hosted data store.
    pub store: StoreClient,
    /// The cached inventory collection.
    pub inventory: Arc<RwLock<Vec<InventoryEntry>>>,
}

impl FromRef<AppState> for CreateInventoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            inventory: state.inventory.clone(),
        }
    }
}

/// The direction selected in the movement radio group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementChoice {
    Inbound,
    Outbound,
}

/// The form data for recording an inventory movement.
#[derive(Debug, Deserialize)]
pub struct InventoryForm {
    /// The date when the movement happened.
    pub date: Date,
    /// Which catalog product moved.
    pub product: Product,
    /// How many units moved.
    pub quantity: u32,
    /// Whether the stock came in or went out.
    pub movement: MovementChoice,
    /// Why outbound stock left. Required when the movement is outbound.
    #[serde(default)]
    pub reason: Option<OutboundReason>,
    /// The sales order, for outbound sales.
    #[serde(default)]
    pub order_number: Option<String>,
    /// Optional free-text note.
    #[serde(default)]
    pub detail: Option<String>,
}

impl InventoryForm {
    /// Combine the loose form fields into a draft, enforcing the
    /// movement/reason coupling.
    fn into_draft(self) -> Result<InventoryDraft, Error> {
        let movement = match self.movement {
            MovementChoice::Inbound => Movement::Inbound,
            MovementChoice::Outbound => {
                let reason = self.reason.ok_or(Error::MissingField("reason"))?;
                Movement::outbound(reason, self.order_number)
            }
        };

        Ok(InventoryDraft {
            date: self.date,
            product: self.product,
            quantity: self.quantity,
            movement,
            detail: self
                .detail
                .and_then(|detail| (!detail.trim().is_empty()).then(|| detail.trim().to_owned())),
        })
    }
}

/// A route handler for recording a new inventory movement.
///
/// The store is asked first; only once it confirms the insert is the cached
/// collection updated. On success the client is redirected to the inventory
/// page for the movement's month.
///
/// # Panics
///
/// Panics if the lock for the inventory collection is poisoned.
pub async fn create_inventory_entry_endpoint(
    State(state): State<CreateInventoryState>,
    Form(form): Form<InventoryForm>,
) -> impl IntoResponse {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    let created = match state.store.create_inventory_entry(&draft).await {
        Ok(created) => created,
        Err(error) => {
            tracing::error!("could not record inventory movement {draft:?}: {error}");
            return error.into_alert_response();
        }
    };

    let month = month_window(created.date).query_value();
    state.inventory.write().unwrap().insert(0, created);

    (
        HxRedirect(format!("{}?month={month}", endpoints::INVENTORY_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::{
        inventory::{Movement, OutboundReason, Product},
        store::StoreClient,
    };

    use super::{
        CreateInventoryState, InventoryForm, MovementChoice, create_inventory_entry_endpoint,
    };

    fn outbound_form() -> InventoryForm {
        InventoryForm {
            date: date!(2025 - 02 - 15),
            product: Product::Standard,
            quantity: 5,
            movement: MovementChoice::Outbound,
            reason: Some(OutboundReason::Sale),
            order_number: Some("ORD-001".to_owned()),
            detail: None,
        }
    }

    #[test]
    fn outbound_without_a_reason_is_rejected() {
        let form = InventoryForm {
            reason: None,
            ..outbound_form()
        };

        let result = form.into_draft();

        assert_eq!(result, Err(crate::Error::MissingField("reason")));
    }

    #[test]
    fn gift_drops_the_order_number() {
        let form = InventoryForm {
            reason: Some(OutboundReason::Gift),
            ..outbound_form()
        };

        let draft = form.into_draft().unwrap();

        assert_eq!(
            draft.movement,
            Movement::Outbound {
                reason: OutboundReason::Gift,
                order_number: None,
            }
        );
    }

    #[test]
    fn blank_detail_becomes_none() {
        let form = InventoryForm {
            detail: Some("   ".to_owned()),
            ..outbound_form()
        };

        let draft = form.into_draft().unwrap();

        assert_eq!(draft.detail, None);
    }

    #[tokio::test]
    async fn confirmed_insert_prepends_to_the_cache_and_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/inventory"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
                {
                    "id": "fresh",
                    "date": "2025-02-15",
                    "product": "Standard",
                    "quantity": 5,
                    "type": "salida",
                    "reason": "venta",
                    "order_number": "ORD-001",
                }
            ])))
            .mount(&server)
            .await;

        let state = CreateInventoryState {
            store: StoreClient::new(server.uri(), "key"),
            inventory: Arc::new(RwLock::new(vec![])),
        };

        let response =
            create_inventory_entry_endpoint(State(state.clone()), Form(outbound_form()))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(HX_REDIRECT)
                .unwrap()
                .to_str()
                .unwrap(),
            "/inventory?month=2025-02"
        );
        assert_eq!(state.inventory.read().unwrap()[0].id, "fresh");
    }

    #[tokio::test]
    async fn failed_insert_leaves_the_cache_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let state = CreateInventoryState {
            store: StoreClient::new(server.uri(), "key"),
            inventory: Arc::new(RwLock::new(vec![])),
        };

        let response =
            create_inventory_entry_endpoint(State(state.clone()), Form(outbound_form()))
                .await
                .into_response();

        assert_ne!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.inventory.read().unwrap().is_empty());
    }
}
