//! A polling-based end-to-end harness for driving notebook web UIs through a
//! headless browser.
//!
//! (*Burattinaio* is Italian for "puppet-master": something has to pull the
//! fantoccini's strings.)
//!
//! Notebook pages render asynchronously and mutate their DOM on their own
//! schedule, so one-shot assertions against them are flaky by construction.
//! This crate's answer is a retry discipline applied uniformly: state checks
//! *and* UI actions are polls, re-evaluated at a bounded interval until the
//! page catches up. Waiting for output text, clicking a menu entry that has
//! not rendered yet, and confirming a dialog that may or may not appear all
//! go through the same [`Poller`](poll::Poller).
//!
//! The pieces, bottom up:
//!
//! - [`page::Page`] — the capability a browser-automation backend supplies:
//!   navigate, read the title, check a selector, extract text, and
//!   atomically check-and-click. The `webdriver` feature (on by default)
//!   implements it for [`fantoccini::Client`].
//! - [`poll`] — retry-until-satisfied, with an optional deadline.
//! - [`matcher`] — `exists` / `contains_text` / `is_blank` predicates over a
//!   page.
//! - [`interact`] — retry-safe clicking and the menu → action → optional
//!   confirm sequence, including the background watch for the kernel
//!   notification area.
//! - [`NotebookSession`] — one page plus one [`SelectorSet`], exposing the
//!   session-level operations: restart-and-clear, restart-and-run-all,
//!   shutdown, and caller-composed waits.
//!
//! By default a poll that can never be satisfied simply never returns; the
//! test runner's own per-test deadline is the failure signal. Callers that
//! prefer an error can attach a deadline to any poll and get
//! [`error::CmdError::WaitTimeout`] instead.
//!
//! # Example
//!
//! Against a notebook server whose bootstrap left its token URL in
//! `_jupyter_url.txt`, and a WebDriver process on port 4444:
//!
//! ```no_run
//! use burattinaio::{session, NotebookSession, SelectorSet};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = session::read_handoff_url(std::path::Path::new("_jupyter_url.txt"))?;
//!     let client = fantoccini::ClientBuilder::native()
//!         .connect("http://localhost:4444")
//!         .await?;
//!
//!     let mut nb = NotebookSession::open(
//!         Arc::new(client),
//!         &base,
//!         "notebooks/notebook_tests/example.ipynb",
//!         SelectorSet::classic(),
//!     )
//!     .await?;
//!
//!     nb.wait_until_present("#notebook-container", Some("here it is:")).await?;
//!
//!     let watch = nb.restart_and_run_all().await?;
//!     nb.wait_until_present("#notebook-container", Some("SECRET BUTTON LABEL")).await?;
//!     watch.join().await?;
//!
//!     nb.shut_down_notebook().await?;
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Error types.
pub mod error;

pub mod interact;
pub mod matcher;
pub mod page;
pub mod poll;
pub mod selectors;
pub mod session;

#[cfg(feature = "webdriver")]
#[cfg_attr(docsrs, doc(cfg(feature = "webdriver")))]
pub mod driver;

pub use crate::interact::NotificationWatch;
pub use crate::matcher::MatchQuery;
pub use crate::page::{MatchResult, Page, PageEvent};
pub use crate::selectors::SelectorSet;
pub use crate::session::NotebookSession;
