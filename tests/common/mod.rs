#![allow(dead_code)]
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;
use vocadb_mb_import::{ImportError, PageSource, Result};

pub const ALBUM_PAGE: &str = include_str!("../fixtures/album_page.html");
pub const LOADING_PAGE: &str = include_str!("../fixtures/loading_page.html");

/// Page source that replays a fixed sequence of pages, repeating the last
/// one once the script runs out.
pub struct ScriptedSource {
    pages: RefCell<VecDeque<String>>,
    last: RefCell<Option<String>>,
    fetches: Cell<u32>,
    location: String,
}

impl ScriptedSource {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: RefCell::new(pages.iter().map(|page| page.to_string()).collect()),
            last: RefCell::new(None),
            fetches: Cell::new(0),
            location: "https://vocadb.net/Al/4242".to_string(),
        }
    }

    /// A page that is still loading for `loading` polls, then renders.
    pub fn renders_after(loading: usize) -> Self {
        let mut pages = vec![LOADING_PAGE; loading];
        pages.push(ALBUM_PAGE);
        Self::new(&pages)
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.get()
    }
}

#[async_trait(?Send)]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        let next = self.pages.borrow_mut().pop_front();
        match next {
            Some(page) => {
                *self.last.borrow_mut() = Some(page.clone());
                Ok(page)
            }
            None => self
                .last
                .borrow()
                .clone()
                .ok_or_else(|| ImportError::Http("no pages scripted".to_string())),
        }
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

/// Page source whose every fetch fails.
pub struct FailingSource;

#[async_trait(?Send)]
impl PageSource for FailingSource {
    async fn fetch_page(&self) -> Result<String> {
        Err(ImportError::Http("connection refused".to_string()))
    }

    fn location(&self) -> String {
        "https://vocadb.net/Al/1".to_string()
    }
}

/// Page source that takes `delay` to answer every fetch and never renders.
pub struct SlowSource {
    delay: Duration,
    fetches: Cell<u32>,
}

impl SlowSource {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fetches: Cell::new(0),
        }
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.get()
    }
}

#[async_trait(?Send)]
impl PageSource for SlowSource {
    async fn fetch_page(&self) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        tokio::time::sleep(self.delay).await;
        Ok(LOADING_PAGE.to_string())
    }

    fn location(&self) -> String {
        "https://vocadb.net/Al/7".to_string()
    }
}
