//! Cajita is a small-business admin web app for tracking petty-cash
//! transactions and product inventory, with monthly PDF report export and a
//! persisted logo for report branding.
//!
//! Durable state lives in a hosted relational data store reached through its
//! auto-generated REST row API; this crate serves the HTML front end and keeps
//! an in-memory cache of the store's collections.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod branding;
mod endpoints;
mod html;
mod internal_server_error;
mod inventory;
mod ledger;
mod month;
mod navigation;
mod not_found;
mod report;
mod routing;
mod store;
mod timezone;

pub use app_state::AppState;
pub use routing::build_router;
pub use store::{StoreClient, StoreErrorPayload};

use crate::{
    alert::Alert, html::render, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The data store rejected a call.
    ///
    /// Carries the error payload the store responded with, e.g. a constraint
    /// violation. Nothing is retried; the failure surfaces once to the caller
    /// and the in-memory collections are left unchanged.
    #[error("data store call failed: {0}")]
    Remote(StoreErrorPayload),

    /// The data store could not be reached at all.
    #[error("could not reach the data store: {0}")]
    Unreachable(String),

    /// The data store answered successfully but the body could not be parsed
    /// into the expected shape.
    #[error("could not parse data store response: {0}")]
    UnexpectedResponse(String),

    /// The requested record could not be found.
    ///
    /// For delete endpoints this usually means the record was already removed
    /// by an earlier request; the client should refresh the page.
    #[error("the requested record could not be found")]
    NotFound,

    /// A required form field was missing or blank.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A money amount was negative or not a finite number.
    ///
    /// Amounts are stored as positive magnitudes; the sign is derived from
    /// the transaction kind when displaying or totalling.
    #[error("{0} is not a valid amount, expected a non-negative number")]
    InvalidAmount(f64),

    /// An inventory quantity was zero.
    #[error("quantity must be a positive whole number")]
    InvalidQuantity,

    /// The `month` query parameter could not be parsed.
    #[error("\"{0}\" is not a valid reporting month, expected YYYY-MM")]
    InvalidMonth(String),

    /// The uploaded logo could not be decoded as an image.
    #[error("invalid logo upload: {0}")]
    InvalidLogo(String),

    /// The multipart form could not be parsed.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The PDF report could not be rendered.
    #[error("could not render the report: {0}")]
    ReportError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidMonth(raw) => render_internal_server_error(
                "Invalid Reporting Month",
                &format!("\"{raw}\" is not a valid reporting month. Use the YYYY-MM format."),
            ),
            Error::InvalidTimezone(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::Remote(payload) => {
                tracing::error!("data store rejected the request: {payload}");
                let details = payload.message;
                render(
                    StatusCode::BAD_GATEWAY,
                    Alert::error("The data store rejected the request", &details).into_html(),
                )
            }
            Error::Unreachable(details) => {
                tracing::error!("could not reach the data store: {details}");
                render(
                    StatusCode::BAD_GATEWAY,
                    Alert::error_simple("Could not reach the data store. Try again later.")
                        .into_html(),
                )
            }
            Error::NotFound => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Record not found",
                    "Try refreshing the page to see if it has already been deleted.",
                )
                .into_html(),
            ),
            Error::MissingField(field) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Missing required field",
                    &format!("The field '{field}' is required."),
                )
                .into_html(),
            ),
            Error::InvalidAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter a non-negative number."),
                )
                .into_html(),
            ),
            Error::InvalidQuantity => render(
                StatusCode::BAD_REQUEST,
                Alert::error_simple("Quantity must be a positive whole number.").into_html(),
            ),
            Error::InvalidLogo(details) => render(
                StatusCode::BAD_REQUEST,
                Alert::error("Could not read the logo image", &details).into_html(),
            ),
            Error::MultipartError(details) => render(
                StatusCode::BAD_REQUEST,
                Alert::error("Could not read the upload", &details).into_html(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_html(),
                )
            }
        }
    }
}
