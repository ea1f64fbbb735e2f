//! Where album pages come from.
//!
//! The poller asks a [`PageSource`] for the current page on every tick, so an
//! implementation should return a fresh snapshot each time it is called.

use crate::{ImportError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::path::PathBuf;

/// Source of the album page HTML.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockPageSource`
/// generated by `mockall`.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait PageSource {
    /// Fetch the current HTML of the page.
    async fn fetch_page(&self) -> Result<String>;

    /// Human-readable location of the page, used in logs and the edit note.
    fn location(&self) -> String;
}

/// Fetches an album page over HTTP.
pub struct HttpPageSource {
    client: Box<dyn HttpClient + Send + Sync>,
    url: String,
}

impl HttpPageSource {
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait(?Send)]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self) -> Result<String> {
        let url = self
            .url
            .parse::<Url>()
            .map_err(|e| ImportError::Http(format!("Invalid URL {}: {e}", self.url)))?;

        let mut request = Request::new(Method::Get, url);
        request.insert_header("User-Agent", "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36");
        request.insert_header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        );
        request.insert_header("Accept-Language", "en-US,en;q=0.9");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| ImportError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImportError::Http(format!(
                "GET {} returned {}",
                self.url,
                response.status()
            )));
        }

        response
            .body_string()
            .await
            .map_err(|e| ImportError::Http(e.to_string()))
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads a saved album page from disk.
#[derive(Debug, Clone)]
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl PageSource for FilePageSource {
    async fn fetch_page(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
