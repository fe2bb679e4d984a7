//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the cash ledger page.
pub const ROOT: &str = "/";
/// The page for displaying the month's petty-cash transactions.
pub const CASH_VIEW: &str = "/cash";
/// The page for recording a new petty-cash transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/cash/new";
/// The route for downloading the monthly cash movements report.
pub const CASH_REPORT: &str = "/cash/report";
/// The page for displaying the month's inventory movements.
pub const INVENTORY_VIEW: &str = "/inventory";
/// The page for recording a new inventory movement.
pub const NEW_INVENTORY_VIEW: &str = "/inventory/new";
/// The route for downloading the monthly inventory movements report.
pub const INVENTORY_REPORT: &str = "/inventory/report";
/// The page for managing the report branding (logo).
pub const SETTINGS_VIEW: &str = "/settings";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a petty-cash transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a petty-cash transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to create an inventory movement.
pub const INVENTORY_API: &str = "/api/inventory";
/// The route to delete an inventory movement.
pub const DELETE_INVENTORY_ENTRY: &str = "/api/inventory/{entry_id}";
/// The route to upload a new logo.
pub const UPLOAD_LOGO: &str = "/api/settings/logo";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::CASH_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CASH_REPORT);
        assert_endpoint_is_valid_uri(endpoints::INVENTORY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_INVENTORY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INVENTORY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::INVENTORY_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_INVENTORY_ENTRY);
        assert_endpoint_is_valid_uri(endpoints::UPLOAD_LOGO);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", "abc-123");

        assert_eq!(formatted_path, "/hello/abc-123");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "1");

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", "1");

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
