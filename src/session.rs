//! Notebook session lifecycle and session-level operations.
//!
//! A [`NotebookSession`] owns exactly one [`Page`] handle and one
//! [`SelectorSet`]. The handle is established during [`NotebookSession::open`]
//! and never silently re-created; [`NotebookSession::page`] always returns
//! the same handle. Operations are sequenced by the caller, one at a time.

use crate::error::{CmdError, NewSessionError};
use crate::interact::{self, NotificationWatch};
use crate::matcher::MatchQuery;
use crate::page::Page;
use crate::poll::{self, Poller};
use crate::selectors::SelectorSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// The notification-area text that confirms the kernel has been shut down.
const NO_KERNEL_TEXT: &str = "No kernel";

/// Splice a page-relative path into a base URL template.
///
/// The template must contain exactly one `?`, immediately before the query
/// string; the path is inserted in front of it. For example, splicing
/// `notebooks/t/example.ipynb` into `http://127.0.0.1:3000/?token=abc` gives
/// `http://127.0.0.1:3000/notebooks/t/example.ipynb?token=abc`.
pub fn splice_page_url(template: &str, path: &str) -> Result<Url, NewSessionError> {
    if template.matches('?').count() != 1 {
        return Err(NewSessionError::BadTemplate(template.to_string()));
    }
    let spliced = template.replacen('?', &format!("{}?", path), 1);
    Url::parse(&spliced).map_err(NewSessionError::BadUrl)
}

/// Read the single-line base URL left in a well-known file by the server
/// bootstrap, for cross-process handoff to the test driver.
pub fn read_handoff_url(path: &Path) -> Result<String, NewSessionError> {
    let raw = std::fs::read_to_string(path).map_err(NewSessionError::HandoffFile)?;
    Ok(raw.trim().to_string())
}

/// Where a session is in its lifecycle.
///
/// The `Unopened` and `PageLoading` legs exist only inside
/// [`NotebookSession::open`]; a constructed session is never observable in
/// either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Ready,
    ShuttingDown,
    Closed,
}

/// One open notebook page, with session-level operations built from the
/// poller, matcher, and interaction sequencing.
///
/// # Lifecycle
///
/// `open` navigates and waits for readiness, yielding a `Ready` session.
/// [`shut_down_notebook`](NotebookSession::shut_down_notebook) moves it
/// through `ShuttingDown` to `Closed`. Calling any operation on a closed
/// session is a programming error and panics; it is not a recoverable
/// failure.
#[derive(Debug)]
pub struct NotebookSession {
    page: Arc<dyn Page>,
    selectors: SelectorSet,
    state: State,
}

impl NotebookSession {
    /// Open a session: splice `path` into `base_template`, navigate the page
    /// there, and wait until the document has a non-empty title.
    pub async fn open(
        page: Arc<dyn Page>,
        base_template: &str,
        path: &str,
        selectors: SelectorSet,
    ) -> Result<Self, NewSessionError> {
        let url = splice_page_url(base_template, path)?;
        debug!(%url, flavor = %selectors.flavor, "opening notebook session");
        page.navigate(&url)
            .await
            .map_err(NewSessionError::Navigation)?;
        // navigate resolves on the backend's own readiness discipline, but
        // readiness for us is an established document title
        Poller::new(poll::PRESENT_INTERVAL)
            .until(|| async { Ok(!page.title().await?.is_empty()) })
            .await
            .map_err(NewSessionError::Navigation)?;
        Ok(Self {
            page,
            selectors,
            state: State::Ready,
        })
    }

    /// The page handle this session drives.
    ///
    /// Idempotent: the same handle comes back for the session's whole
    /// lifetime.
    pub fn page(&self) -> &Arc<dyn Page> {
        &self.page
    }

    /// The selector set this session was built with.
    pub fn selectors(&self) -> &SelectorSet {
        &self.selectors
    }

    fn assert_ready(&self) {
        assert!(
            self.state == State::Ready,
            "operation invoked on a {:?} notebook session",
            self.state
        );
    }

    /// Restart the kernel and clear all cell outputs.
    ///
    /// Returns the [`NotificationWatch`] tracking the kernel notification
    /// area back to blank; the operation itself does not wait for that.
    pub async fn restart_and_clear_outputs(&self) -> Result<NotificationWatch, CmdError> {
        self.assert_ready();
        self.kernel_action(&self.selectors.restart_clear_action)
            .await
    }

    /// Restart the kernel and re-run every cell.
    ///
    /// Returns the [`NotificationWatch`] tracking the kernel notification
    /// area back to blank; the operation itself does not wait for that.
    pub async fn restart_and_run_all(&self) -> Result<NotificationWatch, CmdError> {
        self.assert_ready();
        self.kernel_action(&self.selectors.restart_run_action).await
    }

    async fn kernel_action(&self, action: &str) -> Result<NotificationWatch, CmdError> {
        let watch = interact::find_click_confirm(
            &self.page,
            &self.selectors.kernel_menu,
            action,
            &self.selectors.confirm_button,
            Some(self.selectors.notification_area.as_str()),
            poll::SETTLE_WINDOW,
        )
        .await?;
        match watch {
            Some(watch) => Ok(watch),
            None => unreachable!("notification watch was requested"),
        }
    }

    /// Close the notebook and halt its kernel.
    ///
    /// Shutdown is confirmed observationally, by the notification area
    /// reporting "No kernel", rather than by a page-close event; close
    /// events are not reliably observable across automation backends. If the
    /// text never changes this call never returns, bounded only by the
    /// external test deadline.
    pub async fn shut_down_notebook(&mut self) -> Result<(), CmdError> {
        self.assert_ready();
        self.state = State::ShuttingDown;
        interact::find_click_confirm(
            &self.page,
            &self.selectors.file_menu,
            &self.selectors.close_action,
            &self.selectors.confirm_button,
            None,
            poll::SETTLE_WINDOW,
        )
        .await?;
        let gone = MatchQuery::with_substring(&*self.selectors.notification_area, NO_KERNEL_TEXT);
        Poller::new(poll::PRESENT_INTERVAL)
            .until(|| gone.check(self.page.as_ref()))
            .await?;
        debug!("kernel reported gone; session closed");
        self.state = State::Closed;
        Ok(())
    }

    /// Poll until `selector` matches, or — with a substring — until a match
    /// contains that substring. Uses the default one-second interval and no
    /// deadline.
    pub async fn wait_until_present(
        &self,
        selector: &str,
        substring: Option<&str>,
    ) -> Result<(), CmdError> {
        self.wait_until_present_with(selector, substring, Poller::new(poll::PRESENT_INTERVAL))
            .await
    }

    /// [`wait_until_present`](NotebookSession::wait_until_present) with a
    /// caller-supplied poller, for overriding the interval or opting into a
    /// deadline.
    pub async fn wait_until_present_with(
        &self,
        selector: &str,
        substring: Option<&str>,
        poller: Poller,
    ) -> Result<(), CmdError> {
        self.assert_ready();
        let query = query_for(selector, substring);
        poller.until(|| query.check(self.page.as_ref())).await
    }

    /// Poll until `selector` no longer matches, or — with a substring —
    /// until no match contains that substring.
    pub async fn wait_until_absent(
        &self,
        selector: &str,
        substring: Option<&str>,
    ) -> Result<(), CmdError> {
        self.wait_until_absent_with(selector, substring, Poller::new(poll::ABSENT_INTERVAL))
            .await
    }

    /// [`wait_until_absent`](NotebookSession::wait_until_absent) with a
    /// caller-supplied poller.
    pub async fn wait_until_absent_with(
        &self,
        selector: &str,
        substring: Option<&str>,
        poller: Poller,
    ) -> Result<(), CmdError> {
        self.assert_ready();
        let query = query_for(selector, substring);
        poller.until_not(|| query.check(self.page.as_ref())).await
    }
}

fn query_for(selector: &str, substring: Option<&str>) -> MatchQuery {
    match substring {
        Some(substring) => MatchQuery::with_substring(selector, substring),
        None => MatchQuery::selector(selector),
    }
}
