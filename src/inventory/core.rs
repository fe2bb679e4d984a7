//! Defines the core data models and monthly totals for product inventory.

use std::fmt;

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{Error, month::Dated, store::RecordId};

/// One inventory movement: stock entering or leaving the shop.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    /// The store-assigned id of the entry.
    pub id: RecordId,
    /// When the movement happened.
    pub date: Date,
    /// Which catalog product moved.
    pub product: Product,
    /// How many units moved. Always positive; the direction comes from
    /// [InventoryEntry::movement].
    pub quantity: u32,
    /// Whether the stock came in or went out, and why.
    pub movement: Movement,
    /// Optional free-text note.
    pub detail: Option<String>,
    /// When the store recorded the entry.
    pub created_at: Option<OffsetDateTime>,
}

impl Dated for InventoryEntry {
    fn date(&self) -> Date {
        self.date
    }
}

/// The direction of an inventory movement.
///
/// Outbound movements carry their reason; inbound movements have none. An
/// order number only accompanies outbound sales, which
/// [Movement::outbound] enforces by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    Inbound,
    Outbound {
        reason: OutboundReason,
        order_number: Option<String>,
    },
}

impl Movement {
    /// Build an outbound movement, discarding the order number unless the
    /// reason is a sale.
    pub fn outbound(reason: OutboundReason, order_number: Option<String>) -> Self {
        let order_number = match reason {
            OutboundReason::Sale => {
                order_number.and_then(|n| (!n.trim().is_empty()).then(|| n.trim().to_owned()))
            }
            OutboundReason::Gift => None,
        };

        Self::Outbound {
            reason,
            order_number,
        }
    }

    pub fn is_inbound(&self) -> bool {
        matches!(self, Self::Inbound)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Inbound => "Inbound",
            Self::Outbound { .. } => "Outbound",
        }
    }
}

/// Why outbound stock left the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboundReason {
    Sale,
    Gift,
}

impl OutboundReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Gift => "Gift",
        }
    }
}

/// The fixed product catalog.
///
/// Growing the catalog is a code change; the store keeps the product column
/// as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Standard,
    Premium,
    Mini,
}

/// Every product in the catalog, in display order.
pub const PRODUCT_CATALOG: [Product; 3] = [Product::Standard, Product::Premium, Product::Mini];

impl Product {
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Mini => "Mini",
        }
    }

    /// Look a product up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        PRODUCT_CATALOG
            .into_iter()
            .find(|product| product.name() == name)
    }

    /// The value used for the product in form submissions.
    pub fn form_value(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Mini => "mini",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An inventory movement as entered in the create form, before the store has
/// assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDraft {
    pub date: Date,
    pub product: Product,
    pub quantity: u32,
    pub movement: Movement,
    pub detail: Option<String>,
}

impl InventoryDraft {
    /// Check the required fields before the draft is submitted to the store.
    ///
    /// # Errors
    /// Returns [Error::InvalidQuantity] if the quantity is zero.
    pub fn validate(&self) -> Result<(), Error> {
        if self.quantity == 0 {
            return Err(Error::InvalidQuantity);
        }

        Ok(())
    }
}

/// Month-scoped flow figures plus the all-time running stock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InventoryTotals {
    /// Units received within the displayed month.
    pub month_inbound: u64,
    /// Units that left within the displayed month.
    pub month_outbound: u64,
    /// All-time inbound minus all-time outbound, independent of the
    /// displayed month. Stock on hand is a physical quantity; only the flow
    /// figures are period reports.
    pub running_stock: i64,
}

/// Compute the month's in/out flows from `month_entries` and the running
/// stock from `all_entries`.
pub fn inventory_totals<'a, I>(month_entries: I, all_entries: &[InventoryEntry]) -> InventoryTotals
where
    I: IntoIterator<Item = &'a InventoryEntry>,
{
    let mut totals = InventoryTotals::default();

    for entry in month_entries {
        if entry.movement.is_inbound() {
            totals.month_inbound += u64::from(entry.quantity);
        } else {
            totals.month_outbound += u64::from(entry.quantity);
        }
    }

    for entry in all_entries {
        let quantity = i64::from(entry.quantity);
        if entry.movement.is_inbound() {
            totals.running_stock += quantity;
        } else {
            totals.running_stock -= quantity;
        }
    }

    totals
}

#[cfg(test)]
pub(crate) fn test_entry(
    id: &str,
    date: Date,
    product: Product,
    quantity: u32,
    movement: Movement,
) -> InventoryEntry {
    InventoryEntry {
        id: id.to_owned(),
        date,
        product,
        quantity,
        movement,
        detail: None,
        created_at: None,
    }
}

#[cfg(test)]
mod inventory_totals_tests {
    use time::macros::date;

    use crate::month::{filter_by_month, month_window};

    use super::{
        InventoryEntry, InventoryTotals, Movement, OutboundReason, Product, inventory_totals,
        test_entry,
    };

    fn sample_history() -> Vec<InventoryEntry> {
        vec![
            test_entry(
                "1",
                date!(2025 - 01 - 10),
                Product::Standard,
                20,
                Movement::Inbound,
            ),
            test_entry(
                "2",
                date!(2025 - 02 - 15),
                Product::Standard,
                5,
                Movement::outbound(OutboundReason::Sale, Some("ORD-001".to_owned())),
            ),
        ]
    }

    #[test]
    fn flows_are_month_scoped_but_stock_is_all_time() {
        let entries = sample_history();
        let window = month_window(date!(2025 - 02 - 01));

        let february: Vec<_> = filter_by_month(&entries, window).collect();
        let totals = inventory_totals(february.into_iter(), &entries);

        assert_eq!(
            totals,
            InventoryTotals {
                month_inbound: 0,
                month_outbound: 5,
                running_stock: 15,
            }
        );
    }

    #[test]
    fn running_stock_is_invariant_under_the_reference_month() {
        let entries = sample_history();

        let mut stocks = Vec::new();
        for reference in [
            date!(2025 - 01 - 01),
            date!(2025 - 02 - 01),
            date!(2025 - 07 - 01),
        ] {
            let window = month_window(reference);
            let month: Vec<_> = filter_by_month(&entries, window).collect();
            stocks.push(inventory_totals(month.into_iter(), &entries).running_stock);
        }

        assert_eq!(stocks, vec![15, 15, 15]);
    }

    #[test]
    fn stock_can_go_negative() {
        let entries = vec![test_entry(
            "1",
            date!(2025 - 01 - 10),
            Product::Mini,
            3,
            Movement::outbound(OutboundReason::Gift, None),
        )];
        let window = month_window(date!(2025 - 01 - 01));

        let month: Vec<_> = filter_by_month(&entries, window).collect();
        let totals = inventory_totals(month.into_iter(), &entries);

        assert_eq!(totals.running_stock, -3);
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let totals = inventory_totals([], &[]);

        assert_eq!(totals, InventoryTotals::default());
    }
}
