//! The import run: poll, extract, map, emit.
//!
//! An [`Importer`] drives exactly one run. Its state only moves forward, and
//! a second run on the same importer is rejected.

use crate::extract::extract_release;
use crate::form::SubmissionForm;
use crate::mapping::MappedRelease;
use crate::parsing::VocaDbParser;
use crate::poll::{PollConfig, PollOutcome, Poller};
use crate::source::PageSource;
use crate::types::Release;
use crate::{ImportError, Result};
use scraper::Html;

/// Where an import run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Idle,
    Polling,
    Extracting,
    Mapping,
    Emitting,
    Done,
    TimedOut,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PipelineState::Done | PipelineState::TimedOut | PipelineState::Failed
        )
    }

    /// Whether the run may move from `self` to `next`.
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;

        match (self, next) {
            (Idle, Polling) | (Idle, Extracting) => true,
            (Polling, Extracting) | (Polling, TimedOut) => true,
            (Extracting, Mapping) | (Mapping, Emitting) | (Emitting, Done) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The page was scraped and the form is ready to submit
    Emitted(SubmissionForm),
    /// The page never finished rendering
    TimedOut,
}

/// Drives a single import run.
#[derive(Debug)]
pub struct Importer {
    config: PollConfig,
    state: PipelineState,
}

impl Importer {
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn transition(&mut self, next: PipelineState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(ImportError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        log::debug!("Import state {:?} -> {next:?}", self.state);
        self.state = next;
        Ok(())
    }

    /// Wait for the page to render, then scrape it into a form.
    pub async fn run<S: PageSource + ?Sized>(&mut self, source: &S) -> Result<ImportOutcome> {
        self.transition(PipelineState::Polling)?;

        let mut poller = Poller::new(self.config.clone());
        let html = match poller.run(source).await {
            Ok(PollOutcome::Found(html)) => html,
            Ok(PollOutcome::TimedOut) => {
                self.transition(PipelineState::TimedOut)?;
                return Ok(ImportOutcome::TimedOut);
            }
            Err(e) => return self.fail(e),
        };

        let form = self.process(&html, &source.location())?;
        Ok(ImportOutcome::Emitted(form))
    }

    /// Scrape the page as it is right now, without waiting for the marker.
    pub async fn run_on_demand<S: PageSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<SubmissionForm> {
        if self.state != PipelineState::Idle {
            return Err(ImportError::InvalidTransition {
                from: self.state,
                to: PipelineState::Extracting,
            });
        }

        let html = match source.fetch_page().await {
            Ok(html) => html,
            Err(e) => return self.fail(e),
        };
        self.process(&html, &source.location())
    }

    fn process(&mut self, html: &str, location: &str) -> Result<SubmissionForm> {
        self.transition(PipelineState::Extracting)?;
        let release = match scrape_release(html) {
            Ok(release) => release,
            Err(e) => return self.fail(e),
        };
        log::info!("Extracted release from {location}:\n{release}");

        self.transition(PipelineState::Mapping)?;
        let mapped = match MappedRelease::from_release(release) {
            Ok(mapped) => mapped,
            Err(e) => return self.fail(e),
        };

        self.transition(PipelineState::Emitting)?;
        let source_url = location.starts_with("http").then_some(location);
        let form = SubmissionForm::from_release(&mapped, source_url);
        log::info!(
            "Built submission form with {} fields for {}",
            form.fields().len(),
            form.action()
        );

        self.transition(PipelineState::Done)?;
        Ok(form)
    }

    fn fail<T>(&mut self, error: ImportError) -> Result<T> {
        log::debug!("Import failed in state {:?}: {error}", self.state);
        if self.state.can_transition_to(PipelineState::Failed) {
            self.state = PipelineState::Failed;
        }
        Err(error)
    }
}

/// Parse and extract a release from page HTML in one step.
pub fn scrape_release(html: &str) -> Result<Release> {
    let document = Html::parse_document(html);
    let scraped = VocaDbParser::new().parse_album_page(&document)?;
    extract_release(&scraped)
}

#[cfg(test)]
mod tests {
    use super::PipelineState::*;
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [Idle, Polling, Extracting, Mapping, Emitting, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{pair:?}");
        }
        assert!(Idle.can_transition_to(Extracting));
        assert!(Polling.can_transition_to(TimedOut));
    }

    #[test]
    fn test_no_way_back_to_polling() {
        for state in [Polling, Extracting, Mapping, Emitting, Done, TimedOut, Failed] {
            assert!(!state.can_transition_to(Polling), "{state:?}");
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [Done, TimedOut, Failed] {
            assert!(terminal.is_terminal());
            for next in [Idle, Polling, Extracting, Mapping, Emitting, Done, TimedOut, Failed] {
                assert!(!terminal.can_transition_to(next), "{terminal:?} -> {next:?}");
            }
        }
    }
}
