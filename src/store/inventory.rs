//! Store access for the inventory movement collection.
//!
//! This is the one collection whose wire shape disagrees with the domain
//! shape beyond string coding: the movement direction, its reason and the
//! order number are three nullable columns on the wire but a single
//! [Movement] value in memory. Both directions of that translation live here
//! and nowhere else.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    inventory::{InventoryDraft, InventoryEntry, Movement, OutboundReason, Product},
    store::{RecordId, StoreClient},
};

const TABLE: &str = "inventory";

/// One `inventory` row as the store serves it.
#[derive(Debug, Deserialize)]
struct InventoryRow {
    id: RecordId,
    date: Date,
    product: String,
    quantity: u32,
    #[serde(rename = "type")]
    movement: MovementCode,
    #[serde(default)]
    reason: Option<ReasonCode>,
    #[serde(default)]
    order_number: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

/// The insert body for a new `inventory` row.
#[derive(Debug, Serialize)]
struct NewInventoryRow<'a> {
    date: Date,
    product: &'a str,
    quantity: u32,
    #[serde(rename = "type")]
    movement: MovementCode,
    reason: Option<ReasonCode>,
    order_number: Option<&'a str>,
    detail: Option<&'a str>,
}

/// The wire coding of a movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum MovementCode {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "salida")]
    Outbound,
}

/// The wire coding of an outbound reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ReasonCode {
    #[serde(rename = "venta")]
    Sale,
    #[serde(rename = "regalia")]
    Gift,
}

impl From<OutboundReason> for ReasonCode {
    fn from(reason: OutboundReason) -> Self {
        match reason {
            OutboundReason::Sale => Self::Sale,
            OutboundReason::Gift => Self::Gift,
        }
    }
}

impl From<ReasonCode> for OutboundReason {
    fn from(code: ReasonCode) -> Self {
        match code {
            ReasonCode::Sale => Self::Sale,
            ReasonCode::Gift => Self::Gift,
        }
    }
}

impl TryFrom<InventoryRow> for InventoryEntry {
    type Error = Error;

    fn try_from(row: InventoryRow) -> Result<Self, Error> {
        let product = Product::from_name(&row.product).ok_or_else(|| {
            Error::UnexpectedResponse(format!("unknown product \"{}\"", row.product))
        })?;

        // Inbound rows may carry leftover reason columns; they are dropped
        // rather than rejected.
        let movement = match row.movement {
            MovementCode::Inbound => Movement::Inbound,
            MovementCode::Outbound => {
                let reason = row.reason.ok_or_else(|| {
                    Error::UnexpectedResponse(format!(
                        "outbound inventory row {} has no reason",
                        row.id
                    ))
                })?;
                Movement::outbound(reason.into(), row.order_number)
            }
        };

        Ok(Self {
            id: row.id,
            date: row.date,
            product,
            quantity: row.quantity,
            movement,
            detail: row.detail,
            created_at: row.created_at,
        })
    }
}

fn to_wire_row(draft: &InventoryDraft) -> NewInventoryRow<'_> {
    let (movement, reason, order_number) = match &draft.movement {
        Movement::Inbound => (MovementCode::Inbound, None, None),
        Movement::Outbound {
            reason,
            order_number,
        } => (
            MovementCode::Outbound,
            Some(ReasonCode::from(*reason)),
            order_number.as_deref(),
        ),
    };

    NewInventoryRow {
        date: draft.date,
        product: draft.product.name(),
        quantity: draft.quantity,
        movement,
        reason,
        order_number,
        detail: draft.detail.as_deref(),
    }
}

impl StoreClient {
    /// Fetch the full inventory collection, newest date first.
    pub async fn list_inventory(&self) -> Result<Vec<InventoryEntry>, Error> {
        let rows: Vec<InventoryRow> = self
            .get_rows(TABLE, &[("select", "*"), ("order", "date.desc")])
            .await?;

        rows.into_iter().map(InventoryEntry::try_from).collect()
    }

    /// Insert a new inventory movement and return the record as stored,
    /// including its assigned id and timestamp.
    ///
    /// # Errors
    /// Returns [Error::InvalidQuantity] before any network call when the
    /// draft is incomplete, or the store's error when the insert fails.
    pub async fn create_inventory_entry(
        &self,
        draft: &InventoryDraft,
    ) -> Result<InventoryEntry, Error> {
        draft.validate()?;

        let row = to_wire_row(draft);
        let created: InventoryRow = self.insert_row(TABLE, &row).await?;

        created.try_into()
    }

    /// Delete an inventory movement by id. See [Error::NotFound] for the
    /// already-deleted case.
    pub async fn delete_inventory_entry(&self, id: &str) -> Result<(), Error> {
        self.delete_row(TABLE, id).await
    }
}

#[cfg(test)]
mod inventory_store_tests {
    use time::macros::date;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use crate::{
        Error,
        inventory::{InventoryDraft, Movement, OutboundReason, Product},
        store::StoreClient,
    };

    #[tokio::test]
    async fn list_translates_wire_columns_into_movements() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/inventory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "out-1",
                    "date": "2025-02-15",
                    "product": "Standard",
                    "quantity": 5,
                    "type": "salida",
                    "reason": "venta",
                    "order_number": "ORD-001",
                    "detail": null,
                },
                {
                    "id": "in-1",
                    "date": "2025-01-10",
                    "product": "Standard",
                    "quantity": 20,
                    "type": "entrada",
                    "reason": null,
                    "order_number": null,
                    "detail": "restock",
                },
            ])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let entries = client.list_inventory().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].movement,
            Movement::Outbound {
                reason: OutboundReason::Sale,
                order_number: Some("ORD-001".to_owned()),
            }
        );
        assert_eq!(entries[1].movement, Movement::Inbound);
        assert_eq!(entries[1].detail.as_deref(), Some("restock"));
        assert_eq!(entries[1].date, date!(2025 - 01 - 10));
    }

    #[tokio::test]
    async fn inbound_rows_with_leftover_reason_columns_are_normalised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "in-odd",
                    "date": "2025-01-10",
                    "product": "Mini",
                    "quantity": 2,
                    "type": "entrada",
                    "reason": "venta",
                    "order_number": "ORD-999",
                },
            ])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let entries = client.list_inventory().await.unwrap();

        assert_eq!(entries[0].movement, Movement::Inbound);
    }

    #[tokio::test]
    async fn outbound_row_without_a_reason_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "out-bad",
                    "date": "2025-01-10",
                    "product": "Mini",
                    "quantity": 2,
                    "type": "salida",
                },
            ])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let result = client.list_inventory().await;

        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "x",
                    "date": "2025-01-10",
                    "product": "Discontinued",
                    "quantity": 2,
                    "type": "entrada",
                },
            ])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let result = client.list_inventory().await;

        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn create_writes_the_wire_columns_for_an_outbound_sale() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/inventory"))
            .and(body_json(serde_json::json!({
                "date": "2025-02-15",
                "product": "Standard",
                "quantity": 5,
                "type": "salida",
                "reason": "venta",
                "order_number": "ORD-001",
                "detail": null,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
                {
                    "id": "fresh",
                    "date": "2025-02-15",
                    "product": "Standard",
                    "quantity": 5,
                    "type": "salida",
                    "reason": "venta",
                    "order_number": "ORD-001",
                },
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let draft = InventoryDraft {
            date: date!(2025 - 02 - 15),
            product: Product::Standard,
            quantity: 5,
            movement: Movement::outbound(OutboundReason::Sale, Some("ORD-001".to_owned())),
            detail: None,
        };

        let created = client.create_inventory_entry(&draft).await.unwrap();

        assert_eq!(created.id, "fresh");
    }

    #[tokio::test]
    async fn create_rejects_a_zero_quantity_without_calling_the_store() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri(), "key");
        let draft = InventoryDraft {
            date: date!(2025 - 02 - 15),
            product: Product::Standard,
            quantity: 0,
            movement: Movement::Inbound,
            detail: None,
        };

        let result = client.create_inventory_entry(&draft).await;

        assert_eq!(result, Err(Error::InvalidQuantity));
    }
}
