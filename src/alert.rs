//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments. Error alerts are delivered through
//! the `response-targets` extension (`hx-target-error="#alert-container"`),
//! success alerts replace the alert container via an out-of-band swap so
//! they show up regardless of what the main swap target was. The client
//! script unhides the container and dismisses alerts after a short delay.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A transient message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An action succeeded.
    Success {
        /// Short summary of what succeeded.
        message: String,
    },
    /// An action failed.
    Error {
        /// Short summary of what failed.
        message: String,
        /// Longer explanation shown under the summary.
        details: String,
    },
}

const ALERT_SUCCESS_STYLE: &str = "flex flex-col gap-1 rounded border \
    border-green-300 bg-green-50 px-4 py-3 text-sm text-green-800 shadow-lg \
    dark:border-green-800 dark:bg-gray-800 dark:text-green-400";

const ALERT_ERROR_STYLE: &str = "flex flex-col gap-1 rounded border \
    border-red-300 bg-red-50 px-4 py-3 text-sm text-red-800 shadow-lg \
    dark:border-red-800 dark:bg-gray-800 dark:text-red-400";

impl Alert {
    /// Render the alert as a standalone HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message } => (ALERT_SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ALERT_ERROR_STYLE, message, details),
        };

        html!(
            div class=(style) data-alert role="alert"
            {
                div class="flex items-start justify-between gap-3"
                {
                    span class="font-semibold" { (message) }

                    button
                        type="button"
                        class="font-bold bg-transparent border-none cursor-pointer"
                        aria-label="Dismiss"
                        onclick="this.closest('[data-alert]').remove()"
                    {
                        "\u{00d7}"
                    }
                }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        )
    }

    /// Render the alert wrapped in an out-of-band swap of the alert container.
    pub fn into_oob_html(self) -> Markup {
        html!(
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_html())
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_oob_html().into_response()
    }
}
