use maud::{Markup, html};
use time::Date;

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    ledger::TransactionKind,
};

pub struct TransactionFormDefaults {
    pub kind: TransactionKind,
    pub date: Date,
    pub max_date: Date,
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults) -> Markup {
    let kind_radio = |kind: TransactionKind, value: &str| {
        let id = format!("transaction-kind-{value}");

        html! {
            div class="flex items-center gap-3"
            {
                input
                    name="kind"
                    id=(id)
                    type="radio"
                    value=(value)
                    checked[defaults.kind == kind]
                    required
                    tabindex="0"
                    class=(FORM_RADIO_INPUT_STYLE);

                label
                    for=(id)
                    class=(FORM_RADIO_LABEL_STYLE)
                {
                    (kind.label())
                }
            }
        }
    };

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction kind" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                (kind_radio(TransactionKind::Income, "income"))
                (kind_radio(TransactionKind::Expense, "expense"))
                (kind_radio(TransactionKind::Commission, "commission"))
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0"
                placeholder="0.00"
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="detail"
                class=(FORM_LABEL_STYLE)
            {
                "Detail"
            }

            input
                name="detail"
                id="detail"
                type="text"
                placeholder="What was the money for?"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
