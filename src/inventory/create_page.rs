//! Defines the page with the form for recording a new inventory movement.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, render},
    inventory::form::{InventoryFormDefaults, inventory_form_fields},
    navigation::NavBar,
    timezone::local_today,
};

/// The state needed to display the new-movement page.
#[derive(Debug, Clone)]
pub struct CreateInventoryPageState {
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateInventoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for the page with the form for recording an inventory movement.
pub async fn get_create_inventory_page(
    State(state): State<CreateInventoryPageState>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let defaults = InventoryFormDefaults {
        date: today,
        max_date: today,
    };
    let nav_bar = NavBar::new(endpoints::INVENTORY_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "New Inventory Movement" }

                form
                    class="space-y-4"
                    hx-post=(endpoints::INVENTORY_API)
                    hx-target-error="#alert-container"
                {
                    (inventory_form_fields(&defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                }
            }
        }
    );

    render(StatusCode::OK, base("New Inventory Movement", &content))
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};

    use super::{CreateInventoryPageState, get_create_inventory_page};

    #[tokio::test]
    async fn renders_the_form_with_the_product_catalog() {
        let state = CreateInventoryPageState {
            local_timezone: "Pacific/Auckland".to_owned(),
        };

        let response = get_create_inventory_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("name=\"product\""));
        assert!(body.contains("Standard"));
        assert!(body.contains("name=\"order_number\""));
        assert!(body.contains("value=\"outbound\""));
    }
}
