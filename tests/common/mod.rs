#![allow(dead_code)]

use async_trait::async_trait;
use burattinaio::error::CmdError;
use burattinaio::page::{MatchResult, Page};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use url::Url;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A scripted DOM mutation.
#[derive(Clone, Debug)]
pub enum Mutation {
    /// Make `selector` match elements with these text contents.
    Set(String, Vec<String>),
    /// Make `selector` match nothing.
    Clear(String),
    /// Change the document title.
    Title(String),
}

impl Mutation {
    pub fn set(selector: &str, texts: &[&str]) -> Self {
        Mutation::Set(
            selector.to_string(),
            texts.iter().map(|t| t.to_string()).collect(),
        )
    }

    pub fn clear(selector: &str) -> Self {
        Mutation::Clear(selector.to_string())
    }

    pub fn title(title: &str) -> Self {
        Mutation::Title(title.to_string())
    }
}

#[derive(Clone, Debug)]
struct Scheduled {
    due_at: usize,
    mutation: Mutation,
}

#[derive(Debug, Default)]
struct State {
    title: String,
    navigated: Vec<String>,
    dom: HashMap<String, Vec<String>>,
    clicks: Vec<String>,
    pending: Vec<Scheduled>,
    on_click: HashMap<String, Vec<(usize, Mutation)>>,
    queries: usize,
    fail_with: Option<String>,
}

/// An in-memory [`Page`] whose DOM evolves on a script.
///
/// Time is counted in *queries*: every call that samples or mutates page
/// state advances a counter, and scheduled mutations fire once the counter
/// reaches them. This lets tests express "the dialog renders N polls after
/// the click" without caring about wall-clock intervals.
#[derive(Debug)]
pub struct FakePage {
    state: Mutex<State>,
}

impl FakePage {
    pub fn new() -> Self {
        let page = Self {
            state: Mutex::new(State::default()),
        };
        page.set_title("example.ipynb - Jupyter Notebook");
        page
    }

    pub fn set_title(&self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    /// Make `selector` match elements with these text contents, now.
    pub fn set_texts(&self, selector: &str, texts: &[&str]) {
        let mut s = self.state.lock().unwrap();
        apply(&mut s, Mutation::set(selector, texts));
    }

    /// Fire `mutation` once `delta` more queries have been made.
    pub fn schedule_in(&self, delta: usize, mutation: Mutation) {
        let mut s = self.state.lock().unwrap();
        let due_at = s.queries + delta;
        s.pending.push(Scheduled { due_at, mutation });
    }

    /// Arm `mutation` to fire `delay` queries after `selector` is clicked.
    pub fn when_clicked(&self, selector: &str, delay: usize, mutation: Mutation) {
        let mut s = self.state.lock().unwrap();
        s.on_click
            .entry(selector.to_string())
            .or_default()
            .push((delay, mutation));
    }

    /// Fail the next page call with a backend error carrying `msg`.
    pub fn fail_next(&self, msg: &str) {
        self.state.lock().unwrap().fail_with = Some(msg.to_string());
    }

    /// Every selector clicked so far, in click order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    /// Every URL navigated to so far.
    pub fn navigated(&self) -> Vec<String> {
        self.state.lock().unwrap().navigated.clone()
    }

    /// Advance the query clock and release anything that came due.
    fn step(&self) -> Result<MutexGuard<'_, State>, CmdError> {
        let mut s = self.state.lock().unwrap();
        if let Some(msg) = s.fail_with.take() {
            return Err(CmdError::page(std::io::Error::new(
                std::io::ErrorKind::Other,
                msg,
            )));
        }
        s.queries += 1;
        let now = s.queries;
        let (due, keep): (Vec<_>, Vec<_>) =
            s.pending.drain(..).partition(|p| p.due_at <= now);
        s.pending = keep;
        for scheduled in due {
            apply(&mut s, scheduled.mutation);
        }
        Ok(s)
    }
}

fn apply(s: &mut State, mutation: Mutation) {
    match mutation {
        Mutation::Set(selector, texts) => {
            s.dom.insert(selector, texts);
        }
        Mutation::Clear(selector) => {
            s.dom.remove(&selector);
        }
        Mutation::Title(title) => {
            s.title = title;
        }
    }
}

fn matches(s: &State, selector: &str) -> bool {
    s.dom.get(selector).map_or(false, |texts| !texts.is_empty())
}

#[async_trait]
impl Page for FakePage {
    async fn navigate(&self, url: &Url) -> Result<(), CmdError> {
        self.state.lock().unwrap().navigated.push(url.to_string());
        Ok(())
    }

    async fn title(&self) -> Result<String, CmdError> {
        let s = self.step()?;
        Ok(s.title.clone())
    }

    async fn selector_exists(&self, selector: &str) -> Result<bool, CmdError> {
        let s = self.step()?;
        Ok(matches(&s, selector))
    }

    async fn extract_text(&self, selector: &str) -> Result<MatchResult, CmdError> {
        let s = self.step()?;
        Ok(s.dom.get(selector).cloned().unwrap_or_default())
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool, CmdError> {
        let mut s = self.step()?;
        if !matches(&s, selector) {
            return Ok(false);
        }
        s.clicks.push(selector.to_string());
        if let Some(armed) = s.on_click.remove(selector) {
            let now = s.queries;
            for (delay, mutation) in armed {
                s.pending.push(Scheduled {
                    due_at: now + delay,
                    mutation,
                });
            }
        }
        Ok(true)
    }
}
