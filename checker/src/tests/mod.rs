use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::renderer::PageFetcher;

pub mod directory_tests;
pub mod fixtures;

/// Serves canned markup per URL instead of rendering.
///
/// Each URL holds a queue of pages; every fetch takes the next one and the
/// last page keeps being served once the queue is down to one. Unknown URLs
/// fail like an unreachable host.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: RefCell<HashMap<String, VecDeque<String>>>,
    calls: RefCell<Vec<(String, Duration)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve<S: AsRef<str>>(self, url: &str, pages: &[S]) -> Self {
        self.pages.borrow_mut().insert(
            url.to_string(),
            pages.iter().map(|p| p.as_ref().to_string()).collect(),
        );
        self
    }

    /// Every fetch so far, in order, with the wait it was given.
    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.borrow().iter().filter(|(u, _)| u == url).count()
    }
}

impl PageFetcher for ScriptedFetcher {
    fn fetch(&self, url: &str, wait: Duration) -> Result<String> {
        self.calls.borrow_mut().push((url.to_string(), wait));

        let mut pages = self.pages.borrow_mut();
        let queue = pages
            .get_mut(url)
            .ok_or_else(|| anyhow!("connection refused: {}", url))?;
        let page = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        page.ok_or_else(|| anyhow!("no page scripted for {}", url))
    }
}
