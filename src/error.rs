use thiserror::Error;

use crate::pipeline::PipelineState;

/// Error types for a VocaDB → MusicBrainz import run.
///
/// Every variant aborts the run it occurs in; nothing here is retried.
///
/// ```rust,no_run
/// use vocadb_mb_import::{FilePageSource, ImportError, Importer};
///
/// # tokio_test::block_on(async {
/// let source = FilePageSource::new("album.html");
/// let mut importer = Importer::new(Default::default());
///
/// match importer.run_on_demand(&source).await {
///     Ok(form) => println!("{} fields", form.fields().len()),
///     Err(ImportError::InvalidDate(text)) => eprintln!("Bad release date: {text}"),
///     Err(e) => eprintln!("Import failed: {e}"),
/// }
/// # });
/// ```
#[derive(Error, Debug)]
pub enum ImportError {
    /// HTTP/network related errors while fetching the album page.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The page does not have the structure the extractor expects.
    ///
    /// This usually means VocaDB changed its markup, or the page was fetched
    /// before the tracklist finished rendering.
    #[error("Failed to parse page: {0}")]
    Parse(String),

    /// The release date is missing or is not a calendar date.
    #[error("Invalid release date: {0:?}")]
    InvalidDate(String),

    /// A link rule names a classification with no MusicBrainz code.
    ///
    /// This is a bug in the rule table, not bad input.
    #[error("Unknown link type: {0}")]
    UnknownLinkType(String),

    /// The pipeline was driven out of order, e.g. run twice.
    #[error("Invalid pipeline transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: PipelineState,
        to: PipelineState,
    },

    /// Polling was cancelled from outside before the marker appeared.
    #[error("Polling cancelled")]
    Cancelled,

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
