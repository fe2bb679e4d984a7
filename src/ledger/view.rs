//! HTML rendering for the cash ledger page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    endpoints::format_endpoint,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, SUMMARY_CARD_LABEL_STYLE, SUMMARY_CARD_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, date_datetime_attr,
        delete_action_link, format_currency,
    },
    ledger::{CashTotals, Transaction, TransactionKind},
    month::MonthWindow,
    navigation::NavBar,
};

/// The max number of graphemes to display in the detail column before
/// truncating and displaying ellipses.
const MAX_DETAIL_GRAPHEMES: usize = 32;

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

fn truncate_detail(detail: &str) -> String {
    let graphemes: Vec<&str> = detail.graphemes(true).collect();

    if graphemes.len() <= MAX_DETAIL_GRAPHEMES {
        detail.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_DETAIL_GRAPHEMES].concat())
    }
}

fn kind_badge(kind: TransactionKind) -> Markup {
    let style = match kind {
        TransactionKind::Income => {
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300"
        }
        TransactionKind::Expense => "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
        TransactionKind::Commission => {
            "bg-yellow-100 text-yellow-800 dark:bg-yellow-900 dark:text-yellow-300"
        }
    };

    html!(
        span class={ "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full " (style) }
        {
            (kind.label())
        }
    )
}

fn month_navigation(window: MonthWindow) -> Markup {
    let prev_href = format!("{}?month={}", endpoints::CASH_VIEW, window.prev().query_value());
    let next_href = format!("{}?month={}", endpoints::CASH_VIEW, window.next().query_value());

    html!(
        div class="flex items-center justify-center gap-4 py-3"
        {
            a href=(prev_href) class=(LINK_STYLE) aria-label="Previous month" { "←" }

            h2 class="text-lg font-semibold" { (window.label()) }

            a href=(next_href) class=(LINK_STYLE) aria-label="Next month" { "→" }
        }
    )
}

fn totals_cards(totals: CashTotals) -> Markup {
    let card = |label: &str, value: f64| {
        html!(
            div class=(SUMMARY_CARD_STYLE)
            {
                p class=(SUMMARY_CARD_LABEL_STYLE) { (label) }
                p class={ "text-lg font-bold " (amount_class(value)) } { (format_currency(value)) }
            }
        )
    };

    html!(
        div class="grid grid-cols-2 lg:grid-cols-4 gap-4 w-full"
        {
            (card("Income", totals.income))
            (card("Expense", -totals.expense))
            (card("Commission", totals.commission))
            (card("Balance", totals.balance()))
        }
    )
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, &transaction.id);
    let signed_amount = transaction.signed_amount();
    let action_link = delete_action_link(
        &delete_url,
        &format!(
            "Are you sure you want to delete '{}'? This cannot be undone.",
            transaction.detail
        ),
        "closest tr",
    );

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(date_datetime_attr(transaction.date)) { (transaction.date) }
            }

            td
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                title=(transaction.detail)
            {
                (truncate_detail(&transaction.detail))
            }

            td class=(TABLE_CELL_STYLE) { (kind_badge(transaction.kind)) }

            td class={ "px-6 py-4 text-right " (amount_class(signed_amount)) }
            {
                (format_currency(signed_amount))
            }

            td class=(TABLE_CELL_STYLE) { (action_link) }
        }
    )
}

pub(super) fn cash_view(
    transactions: &[&Transaction],
    totals: CashTotals,
    window: MonthWindow,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CASH_VIEW).into_html();
    let report_href = format!(
        "{}?month={}",
        endpoints::CASH_REPORT,
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
                    h1 class="text-xl font-bold" { "Petty Cash" }

                    a href=(report_href) class=(LINK_STYLE) { "Download PDF" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE) { "Add Entry" }
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Detail" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                                th scope="col" class="px-6 py-3 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No transactions in this month."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Petty Cash", &content)
}
