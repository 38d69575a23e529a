//! Retry-safe UI interactions composed from the poller and the matcher.
//!
//! Elements may not exist yet when an action is requested, so clicking is a
//! poll: locate-and-click in one in-page evaluation, backing off between
//! attempts. Once an element has been found and clicked, a failure is a hard
//! failure; clicks are never re-issued.

use crate::error::CmdError;
use crate::matcher;
use crate::page::Page;
use crate::poll::{self, Poller};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Knobs for [`find_and_click`].
#[derive(Clone, Copy, Debug)]
pub struct ClickOpts {
    /// Backoff between locate-and-click attempts.
    pub retry_interval: Duration,
    /// Give up with [`CmdError::WaitTimeout`] after this long; `None` retries
    /// indefinitely, bounded only by the outer test deadline.
    pub deadline: Option<Duration>,
}

impl Default for ClickOpts {
    fn default() -> Self {
        Self {
            retry_interval: poll::CLICK_RETRY_INTERVAL,
            deadline: None,
        }
    }
}

/// Repeatedly attempt to locate an element matching `selector` and click it,
/// until an attempt actually clicks.
///
/// Locating and clicking happen in a single evaluation against the page (see
/// [`Page::click_if_present`]), so there is no window in which the element
/// can disappear between an existence check and the click.
pub async fn find_and_click(
    page: &dyn Page,
    selector: &str,
    opts: ClickOpts,
) -> Result<(), CmdError> {
    debug!(selector, "find and click");
    let mut poller = Poller::new(opts.retry_interval);
    if let Some(deadline) = opts.deadline {
        poller = poller.with_deadline(deadline);
    }
    poller.until(|| page.click_if_present(selector)).await
}

/// Invoke a menu action and deal with its optional confirmation dialog.
///
/// The composite sequence is:
///
/// 1. [`find_and_click`] on `menu` — opens the menu/dropdown.
/// 2. Poll until `action` exists, then [`find_and_click`] it.
/// 3. Suspend for `settle` so a confirmation dialog gets a chance to render.
/// 4. If `confirm` is now present, click it. Its absence is *not* an error;
///    the dialogs are conditionally rendered.
/// 5. If `watch_blank` names a notification area, spawn — without awaiting —
///    a background poll for that area to become blank, and hand back its
///    [`NotificationWatch`].
///
/// There are no rollback semantics: if a later step fails, earlier clicks
/// stay clicked.
pub async fn find_click_confirm(
    page: &Arc<dyn Page>,
    menu: &str,
    action: &str,
    confirm: &str,
    watch_blank: Option<&str>,
    settle: Duration,
) -> Result<Option<NotificationWatch>, CmdError> {
    find_and_click(page.as_ref(), menu, ClickOpts::default()).await?;

    Poller::new(poll::PRESENT_INTERVAL)
        .until(|| matcher::exists(page.as_ref(), action))
        .await?;
    find_and_click(page.as_ref(), action, ClickOpts::default()).await?;

    debug!(settle_ms = settle.as_millis() as u64, "settle window");
    tokio::time::sleep(settle).await;

    if matcher::exists(page.as_ref(), confirm).await? {
        debug!(confirm, "confirmation dialog present");
        find_and_click(page.as_ref(), confirm, ClickOpts::default()).await?;
    } else {
        debug!(confirm, "no confirmation dialog");
    }

    Ok(watch_blank.map(|area| NotificationWatch::spawn(Arc::clone(page), area.to_string())))
}

/// A handle on the background poll waiting for a notification area to clear.
///
/// Action completion is deliberately not coupled to notification clearing:
/// the spawning operation returns immediately and the poll proceeds on its
/// own. The caller may [`join`](NotificationWatch::join) the watch, or
/// [`abort`](NotificationWatch::abort) it, or just drop the handle and let
/// the poll run to completion unobserved.
#[derive(Debug)]
pub struct NotificationWatch {
    handle: JoinHandle<Result<(), CmdError>>,
}

impl NotificationWatch {
    fn spawn(page: Arc<dyn Page>, selector: String) -> Self {
        let handle = tokio::spawn(async move {
            debug!(selector = %selector, "watching notification area until blank");
            Poller::new(poll::ABSENT_INTERVAL)
                .until(|| matcher::is_blank(page.as_ref(), &selector))
                .await
        });
        Self { handle }
    }

    /// Stop the watch. The background poll is cancelled at its next
    /// suspension point.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the notification area to have become blank.
    ///
    /// Returns `Ok(())` if the watch was aborted before it finished.
    pub async fn join(self) -> Result<(), CmdError> {
        match self.handle.await {
            Ok(res) => res,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}
