//! Waiting for an album page to finish rendering.
//!
//! VocaDB fills in the tracklist client side, so the page is re-read on a
//! fixed interval until the marker element shows up or the wait runs out.

use crate::cancel::{sleep_with_cancel, CancellationState};
use crate::parsing::{VocaDbParser, TRACK_SELECTOR};
use crate::source::PageSource;
use crate::{ImportError, Result};
use scraper::Html;
use std::time::Duration;
use tokio::time::Instant;

/// Configuration for marker polling
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between checks
    pub interval: Duration,
    /// Give up once this much wall-clock time has passed, fetches included
    pub max_wait: Duration,
    /// CSS selector whose presence means the page is ready
    pub marker: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_wait: Duration::from_secs(10),
            marker: TRACK_SELECTOR.to_string(),
        }
    }
}

/// Progress of a single polling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollState {
    /// Wall-clock time since the run started, as of the last check
    pub elapsed: Duration,
    /// Number of times the page has been checked
    pub attempts: u32,
}

/// How a polling run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The marker was present; carries the page HTML it was found in
    Found(String),
    /// The marker never appeared within `max_wait`
    TimedOut,
}

/// Polls a page source for the marker element.
///
/// A poller runs at most once: finding the marker or timing out cancels its
/// token, and a cancelled poller never checks the page again.
#[derive(Debug)]
pub struct Poller {
    config: PollConfig,
    state: PollState,
    cancel: CancellationState,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            state: PollState::default(),
            cancel: CancellationState::new(),
        }
    }

    /// A handle that stops the poll timer when cancelled.
    pub fn cancellation(&self) -> CancellationState {
        self.cancel.clone()
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Wait for the marker, checking once per interval.
    ///
    /// The deadline is measured from the start of the run, so slow fetches
    /// count against `max_wait`. The last fetch may finish past it.
    ///
    /// Returns `ImportError::Cancelled` if the token fires before the marker
    /// is found or the wait runs out.
    pub async fn run<S: PageSource + ?Sized>(&mut self, source: &S) -> Result<PollOutcome> {
        let parser = VocaDbParser::new();
        let started = Instant::now();

        loop {
            sleep_with_cancel(self.cancel.subscribe(), self.config.interval).await?;
            self.state.attempts += 1;

            log::debug!(
                "Checking {} for {} (attempt {})",
                source.location(),
                self.config.marker,
                self.state.attempts
            );

            let html = source.fetch_page().await?;
            self.state.elapsed = started.elapsed();
            if self.cancel.is_cancelled() {
                return Err(ImportError::Cancelled);
            }

            let found = parser.has_marker(&Html::parse_document(&html), &self.config.marker)?;
            if found {
                log::info!("Marker found after {:?}", self.state.elapsed);
                self.cancel.cancel();
                return Ok(PollOutcome::Found(html));
            }

            if self.state.elapsed >= self.config.max_wait {
                log::warn!(
                    "Timed out after {:?}: {} not found on {}",
                    self.state.elapsed,
                    self.config.marker,
                    source.location()
                );
                self.cancel.cancel();
                return Ok(PollOutcome::TimedOut);
            }
        }
    }
}
