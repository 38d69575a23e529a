//! The capability surface a page backend must provide.
//!
//! Everything the harness does to a page goes through [`Page`]. Each method is
//! a single round trip to the browser: in particular [`Page::click_if_present`]
//! performs its existence check and the click in one in-page evaluation, so an
//! element cannot vanish between the check and the click.

use crate::error::CmdError;
use async_trait::async_trait;
use std::fmt;
use url::Url;

/// The text contents of every element currently matching a selector.
///
/// An empty sequence means the selector matched nothing.
pub type MatchResult = Vec<String>;

/// A handle onto one live browser page.
///
/// Implementations are supplied by the browser-automation layer; the
/// `webdriver` feature ships one for [`fantoccini::Client`]. The read methods
/// (`title`, `selector_exists`, `extract_text`) must not mutate the page.
/// Results reflect the DOM at the moment of the call and are never cached.
#[async_trait]
pub trait Page: fmt::Debug + Send + Sync {
    /// Navigate to the given URL and resolve once the backend's own readiness
    /// discipline is satisfied (for the bundled backend: document load plus a
    /// non-empty `document.title`).
    async fn navigate(&self, url: &Url) -> Result<(), CmdError>;

    /// The current document title.
    async fn title(&self) -> Result<String, CmdError>;

    /// Whether at least one element currently matches `selector`.
    async fn selector_exists(&self, selector: &str) -> Result<bool, CmdError>;

    /// The `textContent` of every element currently matching `selector`, in
    /// document order.
    async fn extract_text(&self, selector: &str) -> Result<MatchResult, CmdError>;

    /// If an element matches `selector`, click it and return `true`; return
    /// `false` without clicking otherwise. Check and click happen in one
    /// evaluation against the page.
    async fn click_if_present(&self, selector: &str) -> Result<bool, CmdError>;
}

/// A diagnostic event surfaced by a page backend.
///
/// These are breadcrumbs only: backends that can observe them (console
/// messages, in-page errors, network responses) forward them through
/// [`PageEvent::log`], and they have no effect on control flow. Backends that
/// cannot observe a given kind simply never produce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// A console message emitted inside the page.
    Console {
        /// Message kind as reported by the page ("log", "err", ...).
        kind: String,
        /// Message text.
        text: String,
    },
    /// An uncaught error inside the page.
    PageError {
        /// Error message.
        message: String,
    },
    /// A network response received by the page.
    Response {
        /// HTTP status code.
        status: u16,
        /// Response URL.
        url: String,
    },
    /// A network request that failed outright.
    RequestFailed {
        /// Failure description.
        error: String,
        /// Request URL.
        url: String,
    },
}

impl PageEvent {
    /// Log this event through `tracing`.
    ///
    /// In-page errors and failed requests log at `warn`, the rest at `debug`.
    pub fn log(&self) {
        match *self {
            PageEvent::Console { ref kind, ref text } => {
                tracing::debug!(target: "burattinaio::page", kind = %kind, text = %text, "console")
            }
            PageEvent::PageError { ref message } => {
                tracing::warn!(target: "burattinaio::page", error = %message, "page error")
            }
            PageEvent::Response { status, ref url } => {
                tracing::debug!(target: "burattinaio::page", status, url = %url, "response")
            }
            PageEvent::RequestFailed { ref error, ref url } => {
                tracing::warn!(target: "burattinaio::page", error = %error, url = %url, "request failed")
            }
        }
    }
}
