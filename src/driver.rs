//! [`Page`] backend driving a WebDriver browser through [`fantoccini`].
//!
//! Every typed operation is one `execute` round trip: existence checks are a
//! bare `document.querySelector`, text extraction ships all `textContent`
//! values across the boundary for matching on the Rust side, and
//! check-and-click is a single script so the element cannot vanish between
//! the two.

use crate::error::CmdError;
use crate::page::{MatchResult, Page};
use async_trait::async_trait;
use fantoccini::Client;
use serde_json::{json, Value as Json};
use url::Url;

const TITLE_READY_SCRIPT: &str = "return !!document.title;";

const EXISTS_SCRIPT: &str = "return !!document.querySelector(arguments[0]);";

const TEXTS_SCRIPT: &str = "\
    return Array.prototype.map.call(\
        document.querySelectorAll(arguments[0]),\
        function (el) { return el.textContent; }\
    );";

const CLICK_SCRIPT: &str = "\
    var el = document.querySelector(arguments[0]);\
    if (el) { el.click(); return true; }\
    return false;";

fn wrap(e: fantoccini::error::CmdError) -> CmdError {
    CmdError::page(e)
}

#[async_trait]
impl Page for Client {
    async fn navigate(&self, url: &Url) -> Result<(), CmdError> {
        self.goto(url.as_str()).await.map_err(wrap)?;
        // goto resolves on document load; busy-poll the title on top of
        // that, yielding between evaluations
        loop {
            match self.execute(TITLE_READY_SCRIPT, vec![]).await.map_err(wrap)? {
                Json::Bool(true) => return Ok(()),
                Json::Bool(false) => tokio::task::yield_now().await,
                v => return Err(CmdError::UnexpectedEval(v)),
            }
        }
    }

    async fn title(&self) -> Result<String, CmdError> {
        Client::title(self).await.map_err(wrap)
    }

    async fn selector_exists(&self, selector: &str) -> Result<bool, CmdError> {
        match self
            .execute(EXISTS_SCRIPT, vec![json!(selector)])
            .await
            .map_err(wrap)?
        {
            Json::Bool(b) => Ok(b),
            v => Err(CmdError::UnexpectedEval(v)),
        }
    }

    async fn extract_text(&self, selector: &str) -> Result<MatchResult, CmdError> {
        let raw = self
            .execute(TEXTS_SCRIPT, vec![json!(selector)])
            .await
            .map_err(wrap)?;
        let Json::Array(items) = raw else {
            return Err(CmdError::UnexpectedEval(raw));
        };
        items
            .into_iter()
            .map(|item| match item {
                Json::String(s) => Ok(s),
                // textContent is null for doctype nodes and the like
                Json::Null => Ok(String::new()),
                v => Err(CmdError::UnexpectedEval(v)),
            })
            .collect()
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool, CmdError> {
        match self
            .execute(CLICK_SCRIPT, vec![json!(selector)])
            .await
            .map_err(wrap)?
        {
            Json::Bool(b) => Ok(b),
            v => Err(CmdError::UnexpectedEval(v)),
        }
    }
}
