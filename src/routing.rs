//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    branding::{get_settings_page, upload_logo_endpoint},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    inventory::{
        create_inventory_entry_endpoint, delete_inventory_entry_endpoint,
        get_create_inventory_page, get_inventory_page, get_inventory_report,
    },
    ledger::{
        create_transaction_endpoint, delete_transaction_endpoint, get_cash_page, get_cash_report,
        get_create_transaction_page,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::CASH_VIEW, get(get_cash_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(endpoints::CASH_REPORT, get(get_cash_report))
        .route(endpoints::INVENTORY_VIEW, get(get_inventory_page))
        .route(
            endpoints::NEW_INVENTORY_VIEW,
            get(get_create_inventory_page),
        )
        .route(endpoints::INVENTORY_REPORT, get(get_inventory_report))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::INVENTORY_API,
            post(create_inventory_entry_endpoint),
        )
        .route(
            endpoints::DELETE_INVENTORY_ENTRY,
            delete(delete_inventory_entry_endpoint),
        )
        .route(endpoints::UPLOAD_LOGO, post(upload_logo_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the cash ledger page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::CASH_VIEW)
}
