//! The 404 page.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// A route handler for unmatched paths.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a response with the 404 page.
pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Page not found",
            "Sorry, the page you were looking for does not exist.",
        ),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::get_404_not_found;

    #[tokio::test]
    async fn responds_with_not_found() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
