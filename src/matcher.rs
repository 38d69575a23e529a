//! Selector predicates evaluated against the live DOM.
//!
//! All predicates here are purely observational: they read through
//! [`Page`] and never mutate the page. Nothing is cached, either; each call
//! reflects the DOM at the moment it runs. Backend errors propagate
//! unchanged.

use crate::error::CmdError;
use crate::page::Page;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tracing::debug;

/// True iff `selector` currently matches at least one element, regardless of
/// content.
pub async fn exists(page: &dyn Page, selector: &str) -> Result<bool, CmdError> {
    page.selector_exists(selector).await
}

/// True iff `selector` matches at least one element *and* at least one
/// matched element's text content includes `substring`.
///
/// This is a substring match, not equality. An empty substring degrades to
/// [`exists`]: the selector check alone decides.
pub async fn contains_text(
    page: &dyn Page,
    selector: &str,
    substring: &str,
) -> Result<bool, CmdError> {
    debug!(selector, substring, "looking for substring");
    if !page.selector_exists(selector).await? {
        debug!(selector, "no match for selector");
        return Ok(false);
    }
    if substring.is_empty() {
        return Ok(true);
    }
    // extracting the text and matching on our side of the boundary; fancier
    // matching inside the browser sometimes failed
    let texts = page.extract_text(selector).await?;
    debug!(selector, candidates = texts.len(), "matching extracted text");
    for (i, text) in texts.iter().enumerate() {
        if text.contains(substring) {
            debug!(substring, index = i, "found");
            return Ok(true);
        }
    }
    debug!(selector, substring, "substring not found");
    Ok(false)
}

/// True iff `selector` matches at least one element and every matched
/// element's trimmed text content is empty.
///
/// An empty match set is *not* blank: "no elements" means the question does
/// not apply, and the answer is `false`.
pub async fn is_blank(page: &dyn Page, selector: &str) -> Result<bool, CmdError> {
    let texts = page.extract_text(selector).await?;
    if texts.is_empty() {
        return Ok(false);
    }
    Ok(texts.iter().all(|t| t.trim().is_empty()))
}

/// A selector paired with an optional text substring.
///
/// Queries are evaluated over the live DOM each time [`MatchQuery::check`]
/// runs; results are never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchQuery {
    /// The selector to match.
    pub selector: String,
    /// If set, require a matched element whose text contains this substring.
    pub substring: Option<String>,
}

impl MatchQuery {
    /// A query satisfied by mere presence of the selector.
    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            substring: None,
        }
    }

    /// A query additionally requiring a text-content substring match.
    pub fn with_substring(selector: impl Into<String>, substring: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            substring: Some(substring.into()),
        }
    }

    /// Evaluate this query against the page once.
    ///
    /// Boxed so the presence-only and substring branches unify into one
    /// future type, which is what the poller wants from a predicate.
    pub fn check<'a>(&'a self, page: &'a dyn Page) -> BoxFuture<'a, Result<bool, CmdError>> {
        match self.substring {
            Some(ref substring) => contains_text(page, &self.selector, substring).boxed(),
            None => exists(page, &self.selector).boxed(),
        }
    }
}
