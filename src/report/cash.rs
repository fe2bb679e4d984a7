//! The monthly cash movements report.

use crate::{
    Error,
    html::format_currency,
    ledger::{CashTotals, Transaction},
    month::MonthWindow,
    report::pdf::{Column, ReportMeta, TableDocument, clip_cell},
};

const COLUMNS: [Column; 4] = [
    Column {
        heading: "Date",
        x_mm: 15.0,
    },
    Column {
        heading: "Detail",
        x_mm: 45.0,
    },
    Column {
        heading: "Kind",
        x_mm: 125.0,
    },
    Column {
        heading: "Amount",
        x_mm: 165.0,
    },
];

const MAX_DETAIL_CHARS: usize = 44;

/// The deterministic file name for a month's cash report,
/// e.g. "cash-report-2025-03.pdf".
pub fn file_name(window: MonthWindow) -> String {
    format!("cash-report-{}.pdf", window.query_value())
}

/// Render the month's transactions and totals as a PDF.
pub fn render(
    transactions: &[&Transaction],
    totals: CashTotals,
    meta: &ReportMeta,
) -> Result<Vec<u8>, Error> {
    let mut document = TableDocument::new(meta, &COLUMNS)?;

    for transaction in transactions {
        document.write_row(&[
            transaction.date.to_string(),
            clip_cell(&transaction.detail, MAX_DETAIL_CHARS),
            transaction.kind.label().to_owned(),
            format_currency(transaction.signed_amount()),
        ]);
    }

    document.write_totals(&[
        ("Income", format_currency(totals.income)),
        ("Expense", format_currency(-totals.expense)),
        ("Commission", format_currency(totals.commission)),
        ("Balance", format_currency(totals.balance())),
    ]);

    document.finish()
}
