use std::error::Error;
use std::fmt;
use std::io::Error as IOError;
use url::ParseError;

/// An error occurred while attempting to open a [`NotebookSession`].
///
/// [`NotebookSession`]: crate::NotebookSession
#[derive(Debug)]
pub enum NewSessionError {
    /// The base URL template does not contain exactly one `?` splice point.
    BadTemplate(String),
    /// The spliced page URL is not a valid URL.
    BadUrl(ParseError),
    /// The handoff file with the server's base URL could not be read.
    HandoffFile(IOError),
    /// Navigating the page to the notebook failed, or readiness was never
    /// reported.
    Navigation(CmdError),
}

impl NewSessionError {
    fn kind(&self) -> &str {
        match *self {
            NewSessionError::BadTemplate(..) => "base url template is invalid",
            NewSessionError::BadUrl(..) => "spliced page url is invalid",
            NewSessionError::HandoffFile(..) => "handoff url file could not be read",
            NewSessionError::Navigation(..) => "page navigation failed",
        }
    }
}

impl Error for NewSessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            NewSessionError::BadTemplate(..) => None,
            NewSessionError::BadUrl(ref e) => Some(e),
            NewSessionError::HandoffFile(ref e) => Some(e),
            NewSessionError::Navigation(ref e) => Some(e),
        }
    }
}

impl fmt::Display for NewSessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind())?;
        match *self {
            NewSessionError::BadTemplate(ref t) => {
                write!(f, "expected exactly one `?` in {:?}", t)
            }
            NewSessionError::BadUrl(ref e) => write!(f, "{}", e),
            NewSessionError::HandoffFile(ref e) => write!(f, "{}", e),
            NewSessionError::Navigation(ref e) => write!(f, "{}", e),
        }
    }
}

/// An error occurred while polling or interacting with the page.
///
/// Note that "condition not yet satisfied" is *not* an error: polls absorb it
/// by retrying. Only page-evaluation failures and opted-into deadlines
/// surface here.
#[derive(Debug)]
pub enum CmdError {
    /// The page backend itself failed (navigation aborted, execution context
    /// destroyed, connection lost).
    ///
    /// This is fatal to the enclosing operation and is never retried.
    Page(Box<dyn Error + Send + Sync>),

    /// An in-page evaluation produced a value of an unexpected shape.
    UnexpectedEval(serde_json::Value),

    /// A poll's optional deadline elapsed before its condition held.
    ///
    /// Polls without a deadline never produce this; they block until the
    /// external test-runner ceiling aborts them.
    WaitTimeout,
}

impl CmdError {
    /// Returns true if this error is the elapse of a poll deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CmdError::WaitTimeout)
    }

    /// Wrap a page-backend error.
    pub fn page<E>(e: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        CmdError::Page(Box::new(e))
    }

    fn kind(&self) -> &str {
        match *self {
            CmdError::Page(..) => "page evaluation failed",
            CmdError::UnexpectedEval(..) => "page evaluation returned unexpected value",
            CmdError::WaitTimeout => "timeout waiting on condition",
        }
    }
}

impl Error for CmdError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CmdError::Page(ref e) => Some(&**e),
            CmdError::UnexpectedEval(..) | CmdError::WaitTimeout => None,
        }
    }
}

impl fmt::Display for CmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind())?;
        match *self {
            CmdError::Page(ref e) => write!(f, "{}", e),
            CmdError::UnexpectedEval(ref v) => write!(f, "{:?}", v),
            CmdError::WaitTimeout => Ok(()),
        }
    }
}
