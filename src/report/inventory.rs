//! The monthly inventory movements report.

use crate::{
    Error,
    inventory::{InventoryEntry, InventoryTotals, Movement},
    month::MonthWindow,
    report::pdf::{Column, ReportMeta, TableDocument, clip_cell},
};

const COLUMNS: [Column; 6] = [
    Column {
        heading: "Date",
        x_mm: 15.0,
    },
    Column {
        heading: "Product",
        x_mm: 42.0,
    },
    Column {
        heading: "Movement",
        x_mm: 68.0,
    },
    Column {
        heading: "Qty",
        x_mm: 93.0,
    },
    Column {
        heading: "Reason",
        x_mm: 108.0,
    },
    Column {
        heading: "Detail",
        x_mm: 148.0,
    },
];

const MAX_DETAIL_CHARS: usize = 24;

/// The deterministic file name for a month's inventory report,
/// e.g. "inventory-report-2025-03.pdf".
pub fn file_name(window: MonthWindow) -> String {
    format!("inventory-report-{}.pdf", window.query_value())
}

fn reason_cell(movement: &Movement) -> String {
    match movement {
        Movement::Inbound => String::new(),
        Movement::Outbound {
            reason,
            order_number,
        } => match order_number {
            Some(order_number) => format!("{} ({order_number})", reason.label()),
            None => reason.label().to_owned(),
        },
    }
}

/// Render the month's inventory movements and totals as a PDF.
pub fn render(
    entries: &[&InventoryEntry],
    totals: InventoryTotals,
    meta: &ReportMeta,
) -> Result<Vec<u8>, Error> {
    let mut document = TableDocument::new(meta, &COLUMNS)?;

    for entry in entries {
        document.write_row(&[
            entry.date.to_string(),
            entry.product.name().to_owned(),
            entry.movement.label().to_owned(),
            entry.quantity.to_string(),
            reason_cell(&entry.movement),
            clip_cell(entry.detail.as_deref().unwrap_or(""), MAX_DETAIL_CHARS),
        ]);
    }

    document.write_totals(&[
        ("Inbound", totals.month_inbound.to_string()),
        ("Outbound", totals.month_outbound.to_string()),
        ("Running stock", totals.running_stock.to_string()),
    ]);

    document.finish()
}
