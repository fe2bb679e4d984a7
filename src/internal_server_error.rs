//! The 500 page.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// A route handler for the generic internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(
        "Something went wrong",
        "An unexpected error occurred, check the server logs for more details.",
    )
}

/// Get a response with the 500 page, customised with a `description` of the
/// failure and a suggested `fix`.
pub fn render_internal_server_error(description: &str, fix: &str) -> Response {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Internal Server Error", "500", description, fix),
    )
}
