//! Selector predicate semantics over a scripted fake page.

mod common;

use burattinaio::error::CmdError;
use burattinaio::{matcher, MatchQuery};
use common::FakePage;

#[tokio::test]
async fn zero_matches_is_false_for_every_predicate() {
    let page = FakePage::new();
    assert!(!matcher::exists(&page, "#nope").await.unwrap());
    assert!(!matcher::contains_text(&page, "#nope", "anything").await.unwrap());
    assert!(!matcher::contains_text(&page, "#nope", "").await.unwrap());
    // "no elements" is distinct from "blank elements"
    assert!(!matcher::is_blank(&page, "#nope").await.unwrap());
}

#[tokio::test]
async fn substring_matches_any_element_not_all() {
    let page = FakePage::new();
    page.set_texts("#a", &["foo", "bar baz"]);
    assert!(matcher::contains_text(&page, "#a", "baz").await.unwrap());
    assert!(!matcher::contains_text(&page, "#a", "zzz").await.unwrap());
    assert!(!matcher::is_blank(&page, "#a").await.unwrap());
}

#[tokio::test]
async fn empty_substring_degrades_to_exists() {
    let page = FakePage::new();
    page.set_texts("#present", &["whatever"]);
    assert!(matcher::contains_text(&page, "#present", "").await.unwrap());
    assert!(!matcher::contains_text(&page, "#absent", "").await.unwrap());
}

#[tokio::test]
async fn whitespace_only_elements_are_blank() {
    let page = FakePage::new();
    page.set_texts("#empty", &["   "]);
    assert!(matcher::is_blank(&page, "#empty").await.unwrap());
    assert!(matcher::exists(&page, "#empty").await.unwrap());
}

#[tokio::test]
async fn one_nonblank_element_spoils_blankness() {
    let page = FakePage::new();
    page.set_texts("#mixed", &["", "kernel busy", "   "]);
    assert!(!matcher::is_blank(&page, "#mixed").await.unwrap());
}

#[tokio::test]
async fn contains_text_is_idempotent() {
    let page = FakePage::new();
    page.set_texts("#a", &["foo", "bar baz"]);
    let first = matcher::contains_text(&page, "#a", "baz").await.unwrap();
    let second = matcher::contains_text(&page, "#a", "baz").await.unwrap();
    assert_eq!(first, second);
    // predicates are pure reads
    assert!(page.clicks().is_empty());
}

#[tokio::test]
async fn backend_failure_propagates_unchanged() {
    let page = FakePage::new();
    page.set_texts("#a", &["foo"]);
    page.fail_next("execution context was destroyed");
    let err = matcher::contains_text(&page, "#a", "foo").await.unwrap_err();
    assert!(matches!(err, CmdError::Page(..)));
}

#[tokio::test]
async fn match_query_covers_both_shapes() {
    let page = FakePage::new();
    page.set_texts("#a", &["bar baz"]);
    assert!(MatchQuery::selector("#a").check(&page).await.unwrap());
    assert!(MatchQuery::with_substring("#a", "baz")
        .check(&page)
        .await
        .unwrap());
    assert!(!MatchQuery::with_substring("#a", "zzz")
        .check(&page)
        .await
        .unwrap());
}
