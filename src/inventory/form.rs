use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    inventory::{OutboundReason, PRODUCT_CATALOG},
};

pub struct InventoryFormDefaults {
    pub date: Date,
    pub max_date: Date,
}

/// Shows the reason and order-number inputs only while "outbound" is
/// selected, and the order-number input only while the reason is a sale.
/// The server enforces both rules regardless.
const OUTBOUND_FIELDS_SCRIPT: &str = r#"
(function () {
    function sync() {
        var outbound = document.getElementById('movement-outbound').checked;
        var sale = document.getElementById('reason').value === 'sale';
        document.getElementById('outbound-fields').hidden = !outbound;
        document.getElementById('order-number-field').hidden = !(outbound && sale);
        document.getElementById('reason').required = outbound;
    }
    document.querySelectorAll('input[name=movement], #reason')
        .forEach(function (el) { el.addEventListener('change', sync); });
    sync();
})();
"#;

pub fn inventory_form_fields(defaults: &InventoryFormDefaults) -> Markup {
    html! {
        div
        {
            label
                for="product"
                class=(FORM_LABEL_STYLE)
            {
                "Product"
            }

            select
                name="product"
                id="product"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for product in PRODUCT_CATALOG {
                    option value=(product.form_value()) { (product.name()) }
                }
            }
        }

        div
        {
            label
                for="quantity"
                class=(FORM_LABEL_STYLE)
            {
                "Quantity"
            }

            input
                name="quantity"
                id="quantity"
                type="number"
                step="1"
                min="1"
                placeholder="1"
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

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Movement" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="movement"
                        id="movement-inbound"
                        type="radio"
                        value="inbound"
                        checked
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="movement-inbound"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Inbound"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="movement"
                        id="movement-outbound"
                        type="radio"
                        value="outbound"
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="movement-outbound"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Outbound"
                    }
                }
            }
        }

        div id="outbound-fields" hidden
        {
            div
            {
                label
                    for="reason"
                    class=(FORM_LABEL_STYLE)
                {
                    "Reason"
                }

                select
                    name="reason"
                    id="reason"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(serialized_reason(OutboundReason::Sale)) { "Sale" }
                    option value=(serialized_reason(OutboundReason::Gift)) { "Gift" }
                }
            }

            div id="order-number-field"
            {
                label
                    for="order_number"
                    class=(FORM_LABEL_STYLE)
                {
                    "Order number"
                }

                input
                    name="order_number"
                    id="order_number"
                    type="text"
                    placeholder="ORD-001"
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="detail"
                class=(FORM_LABEL_STYLE)
            {
                "Detail (optional)"
            }

            input
                name="detail"
                id="detail"
                type="text"
                placeholder="Notes about the movement"
                class=(FORM_TEXT_INPUT_STYLE);
        }

        script { (PreEscaped(OUTBOUND_FIELDS_SCRIPT)) }
    }
}

fn serialized_reason(reason: OutboundReason) -> &'static str {
    match reason {
        OutboundReason::Sale => "sale",
        OutboundReason::Gift => "gift",
    }
}
