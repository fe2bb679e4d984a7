//! HTML rendering for the inventory page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    endpoints::format_endpoint,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, SUMMARY_CARD_LABEL_STYLE, SUMMARY_CARD_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, date_datetime_attr,
        delete_action_link,
    },
    inventory::{InventoryEntry, InventoryTotals, Movement},
    month::MonthWindow,
    navigation::NavBar,
};

const MAX_DETAIL_GRAPHEMES: usize = 24;

fn truncate_detail(detail: &str) -> String {
    let graphemes: Vec<&str> = detail.graphemes(true).collect();

    if graphemes.len() <= MAX_DETAIL_GRAPHEMES {
        detail.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_DETAIL_GRAPHEMES].concat())
    }
}

fn movement_badge(movement: &Movement) -> Markup {
    let style = if movement.is_inbound() {
        "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300"
    } else {
        "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300"
    };

    html!(
        span class={ "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full " (style) }
        {
            (movement.label())
        }
    )
}

fn reason_cell(movement: &Movement) -> Markup {
    match movement {
        Movement::Inbound => html!( span class="text-gray-400" { "—" } ),
        Movement::Outbound {
            reason,
            order_number,
        } => html!(
            (reason.label())

            @if let Some(order_number) = order_number {
                " "
                span class="text-gray-500 dark:text-gray-400" { "(" (order_number) ")" }
            }
        ),
    }
}

fn month_navigation(window: MonthWindow) -> Markup {
    let prev_href = format!(
        "{}?month={}",
        endpoints::INVENTORY_VIEW,
        window.prev().query_value()
    );
    let next_href = format!(
        "{}?month={}",
        endpoints::INVENTORY_VIEW,
        window.next().query_value()
    );

    html!(
        div class="flex items-center justify-center gap-4 py-3"
        {
            a href=(prev_href) class=(LINK_STYLE) aria-label="Previous month" { "←" }

            h2 class="text-lg font-semibold" { (window.label()) }

            a href=(next_href) class=(LINK_STYLE) aria-label="Next month" { "→" }
        }
    )
}

fn totals_cards(totals: InventoryTotals) -> Markup {
    let card = |label: &str, value: String| {
        html!(
            div class=(SUMMARY_CARD_STYLE)
            {
                p class=(SUMMARY_CARD_LABEL_STYLE) { (label) }
                p class="text-lg font-bold" { (value) }
            }
        )
    };

    html!(
        div class="grid grid-cols-3 gap-4 w-full"
        {
            (card("Inbound this month", totals.month_inbound.to_string()))
            (card("Outbound this month", totals.month_outbound.to_string()))
            (card("Running stock", totals.running_stock.to_string()))
        }
    )
}

fn entry_row(entry: &InventoryEntry) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_INVENTORY_ENTRY, &entry.id);
    let action_link = delete_action_link(
        &delete_url,
        &format!(
            "Are you sure you want to delete this {} movement of {} x {}? This cannot be undone.",
            entry.movement.label().to_lowercase(),
            entry.quantity,
            entry.product.name()
        ),
        "closest tr",
    );

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(date_datetime_attr(entry.date)) { (entry.date) }
            }

            td class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (entry.product.name())
            }

            td class=(TABLE_CELL_STYLE) { (movement_badge(&entry.movement)) }

            td class="px-6 py-4 text-right" { (entry.quantity) }

            td class=(TABLE_CELL_STYLE) { (reason_cell(&entry.movement)) }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(detail) = &entry.detail {
                    span title=(detail) { (truncate_detail(detail)) }
                }
            }

            td class=(TABLE_CELL_STYLE) { (action_link) }
        }
    )
}

pub(super) fn inventory_view(
    entries: &[&InventoryEntry],
    totals: InventoryTotals,
    window: MonthWindow,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::INVENTORY_VIEW).into_html();
    let report_href = format!(
        "{}?month={}",
        endpoints::INVENTORY_REPORT,
        window.query_value()
    );

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Inventory" }

                    a href=(report_href) class=(LINK_STYLE) { "Download PDF" }

                    a href=(endpoints::NEW_INVENTORY_VIEW) class=(LINK_STYLE) { "Add Movement" }
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    (month_navigation(window))

                    div class="px-4 pb-4" { (totals_cards(totals)) }

                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Product" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Movement" }
                                th scope="col" class="px-6 py-3 text-right" { "Qty" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Reason" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Detail" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for entry in entries {
                                (entry_row(entry))
                            }

                            @if entries.is_empty() {
                                tr
                                {
                                    td
                                        colspan="7"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No inventory movements in this month."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Inventory", &content)
}

#[cfg(test)]
mod inventory_view_tests {
    use time::macros::date;

    use crate::{
        inventory::{Movement, OutboundReason, Product, core::test_entry, inventory_totals},
        month::month_window,
    };

    use super::inventory_view;

    #[test]
    fn renders_rows_and_running_stock() {
        let entries = vec![
            test_entry("1", date!(2025 - 01 - 10), Product::Standard, 20, Movement::Inbound),
            test_entry(
                "2",
                date!(2025 - 02 - 15),
                Product::Standard,
                5,
                Movement::outbound(OutboundReason::Sale, Some("ORD-001".to_owned())),
            ),
        ];
        let window = month_window(date!(2025 - 02 - 01));
        let february: Vec<_> = entries.iter().filter(|e| e.date.month() == time::Month::February).collect();
        let totals = inventory_totals(february.iter().copied(), &entries);

        let html = inventory_view(&february, totals, window).into_string();

        assert!(html.contains("February 2025"));
        assert!(html.contains("ORD-001"));
        assert!(html.contains("Running stock"));
        assert!(html.contains("/api/inventory/2"));
        assert!(!html.contains("2025-01-10"));
    }

    #[test]
    fn renders_empty_state() {
        let html = inventory_view(
            &[],
            Default::default(),
            month_window(date!(2025 - 02 - 01)),
        )
        .into_string();

        assert!(html.contains("No inventory movements in this month."));
    }
}
