//! Bounded-interval condition polling.
//!
//! The target pages render asynchronously and mutate their DOM on their own
//! schedule, so single-shot checks are unreliable and mutation events are not
//! observable from outside. The poller trades latency for robustness: it
//! re-evaluates a predicate at a fixed interval until the predicate holds.
//!
//! A poller has no engine-level timeout by default; an unsatisfiable
//! condition blocks until the enclosing test runner's deadline aborts it.
//! Callers that want a harder guarantee opt into one with
//! [`Poller::with_deadline`] and get [`CmdError::WaitTimeout`] back instead
//! of a hang.

use crate::error::CmdError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Default interval between evaluations when waiting for a condition to hold.
pub const PRESENT_INTERVAL: Duration = Duration::from_millis(1000);

/// Default interval between evaluations when waiting for a condition to stop
/// holding.
pub const ABSENT_INTERVAL: Duration = Duration::from_millis(1000);

/// Default backoff between attempts to locate-and-click an element.
pub const CLICK_RETRY_INTERVAL: Duration = Duration::from_millis(2500);

/// Default settle window: how long to suspend after invoking an action so an
/// optional confirmation dialog gets a chance to render.
pub const SETTLE_WINDOW: Duration = Duration::from_millis(1000);

/// Retry-until-satisfied engine.
///
/// Predicate failures are a distinct failure mode from "not yet satisfied":
/// an `Err` from the predicate aborts the poll immediately rather than being
/// retried.
#[derive(Clone, Copy, Debug)]
pub struct Poller {
    interval: Duration,
    deadline: Option<Duration>,
}

impl Poller {
    /// A poller evaluating its predicate every `interval`, with no deadline.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Fail with [`CmdError::WaitTimeout`] once `deadline` has elapsed
    /// without the condition holding.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Evaluate `condition` until it returns `Ok(true)`.
    ///
    /// An already-true condition returns on the first evaluation without any
    /// suspension. `Ok(false)` never surfaces to the caller; it is absorbed
    /// by sleeping one interval and retrying.
    pub async fn until<F, FF>(&self, mut condition: F) -> Result<(), CmdError>
    where
        F: FnMut() -> FF,
        FF: Future<Output = Result<bool, CmdError>>,
    {
        let started = Instant::now();
        loop {
            if condition().await? {
                return Ok(());
            }
            if let Some(deadline) = self.deadline {
                if started.elapsed() >= deadline {
                    return Err(CmdError::WaitTimeout);
                }
            }
            sleep(self.interval).await;
        }
    }

    /// Evaluate `condition` until it returns `Ok(false)`.
    ///
    /// Success means the condition of "gone" holds; like [`Poller::until`]
    /// this returns `Ok(())`, never a boolean.
    pub async fn until_not<F, FF>(&self, mut condition: F) -> Result<(), CmdError>
    where
        F: FnMut() -> FF,
        FF: Future<Output = Result<bool, CmdError>>,
    {
        let started = Instant::now();
        loop {
            if !condition().await? {
                return Ok(());
            }
            if let Some(deadline) = self.deadline {
                if started.elapsed() >= deadline {
                    return Err(CmdError::WaitTimeout);
                }
            }
            sleep(self.interval).await;
        }
    }
}
