//! Scrape VocaDB album pages into a pre-filled MusicBrainz release editor form.
//!
//! The pipeline polls a page until its tracklist has rendered, extracts a
//! [`Release`] from the properties table and tracklist, maps it onto
//! MusicBrainz's seeding fields, and emits a [`SubmissionForm`].

pub mod cancel;
pub mod document;
pub mod error;
pub mod extract;
pub mod form;
pub mod mapping;
pub mod parsing;
pub mod pipeline;
pub mod poll;
pub mod source;
pub mod types;

pub use cancel::CancellationState;
pub use document::{PropertyRow, ScrapedDocument, ScrapedLink, TrackRow};
pub use error::ImportError;
pub use extract::{extract_release, PropertyLabel};
pub use form::{SubmissionForm, RELEASE_ADD_URL};
pub use mapping::{MappedRelease, ReleaseDate};
pub use parsing::VocaDbParser;
pub use pipeline::{scrape_release, ImportOutcome, Importer, PipelineState};
pub use poll::{PollConfig, PollOutcome, PollState, Poller};
#[cfg(feature = "mock")]
pub use source::MockPageSource;
pub use source::{FilePageSource, HttpPageSource, PageSource};
pub use types::{LabelRef, LinkRef, Release, ReleaseType, Track};

// Re-export scraper types for testing
pub use scraper::Html;

pub type Result<T> = std::result::Result<T, ImportError>;
