//! Alert messages for displaying error notifications to users.
//!
//! Alerts render as a floating card that htmx swaps into the `#alert-container`
//! element of the base layout, either as the error target of a form or as an
//! out-of-band swap.

use maud::{Markup, html};

/// A dismissable alert message.
///
/// Every mutation redirects on success, so only error alerts exist.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A red error message with detail text.
    Error {
        /// Short headline.
        message: String,
        /// Supporting detail text.
        details: String,
    },
    /// A red error message without detail text.
    ErrorSimple {
        /// Short headline.
        message: String,
    },
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert without details.
    pub fn error_simple(message: &str) -> Self {
        Self::ErrorSimple {
            message: message.to_owned(),
        }
    }

    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, details),
            Alert::ErrorSimple { message } => (message, String::new()),
        };

        html! {
            div
                role="alert"
                class="flex items-start gap-3 rounded border p-4 shadow-lg \
                    border-red-300 bg-red-50 text-red-900 \
                    dark:border-red-700 dark:bg-red-900/40 dark:text-red-100"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    class="font-bold"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "\u{00d7}"
                }
            }
        }
    }
}
