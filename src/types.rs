//! Data types for scraped VocaDB releases.
//!
//! These are built fresh for every import run, held in memory only, and
//! dropped once the submission form has been emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A release as scraped from a VocaDB album page.
///
/// # Examples
///
/// ```rust
/// use vocadb_mb_import::{Release, ReleaseType, Track};
///
/// let release = Release {
///     title: "Sample Album".to_string(),
///     release_type: Some(ReleaseType::Album),
///     tracks: vec![Track {
///         position: 1,
///         title: "Opening".to_string(),
///         artist: "someone feat. Hatsune Miku".to_string(),
///         duration: "3:45".to_string(),
///     }],
///     ..Default::default()
/// };
///
/// assert_eq!(release.tracks.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Album title, from the `Name` row
    pub title: String,
    /// Primary credit, set only when exactly one producer is listed
    pub artist: Option<String>,
    /// Circle (group) credit, preferred over `artist` when present
    pub group: Option<String>,
    /// Release date exactly as displayed on the page
    pub release_date: Option<String>,
    pub release_type: Option<ReleaseType>,
    pub label: Option<LabelRef>,
    /// Tracks in source order; `position` is the 1-based index in this list
    pub tracks: Vec<Track>,
    /// Official links that matched a known domain
    pub links: Vec<LinkRef>,
}

impl Release {
    /// The credit submitted as the release artist: the circle if there is
    /// one, otherwise the sole producer.
    pub fn artist_credit(&self) -> Option<&str> {
        self.group.as_deref().or(self.artist.as_deref())
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}, Release date: {}, Type: {}, Labels: {}",
            self.title,
            self.release_date.as_deref().unwrap_or("unknown"),
            self.release_type
                .as_ref()
                .map(ReleaseType::as_str)
                .unwrap_or("unknown"),
            self.label
                .as_ref()
                .and_then(|label| label.name.as_deref())
                .unwrap_or("none"),
        )?;
        for track in &self.tracks {
            writeln!(f, "{track}")?;
        }
        Ok(())
    }
}

/// A single tracklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// 1-based position within the release
    pub position: u32,
    pub title: String,
    /// Artist credit text as shown under the title
    pub artist: String,
    /// Duration with the surrounding parentheses removed, e.g. `3:45`
    pub duration: String,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. Title: {}, Artist: {}, Duration: {}",
            self.position, self.title, self.artist, self.duration
        )
    }
}

/// Release type, normalized from VocaDB's disc type labels.
///
/// Labels without a MusicBrainz counterpart are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReleaseType {
    Album,
    Ep,
    Single,
    Other(String),
}

impl ReleaseType {
    /// Map a VocaDB `Type` row value onto the MusicBrainz vocabulary.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "E.P." | "EP" => ReleaseType::Ep,
            "Original album" | "Album" => ReleaseType::Album,
            "Single" => ReleaseType::Single,
            other => ReleaseType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseType::Album => "Album",
            ReleaseType::Ep => "EP",
            ReleaseType::Single => "Single",
            ReleaseType::Other(label) => label,
        }
    }
}

impl From<String> for ReleaseType {
    fn from(label: String) -> Self {
        ReleaseType::from_label(&label)
    }
}

impl From<ReleaseType> for String {
    fn from(release_type: ReleaseType) -> Self {
        release_type.as_str().to_string()
    }
}

/// Record label reference. Any component may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelRef {
    pub name: Option<String>,
    /// MusicBrainz label MBID, known only for aliased labels
    pub mbid: Option<String>,
    pub catalog_number: Option<String>,
}

/// An external link with the MusicBrainz link type codes it is submitted under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRef {
    pub url: String,
    /// Codes in submission order; never empty for links kept on a release
    pub link_types: Vec<u32>,
}
