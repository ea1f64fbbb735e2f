//! Declarative view of a VocaDB album page.
//!
//! The extractor works on these plain values instead of a live HTML tree, so
//! tests can build a document by hand without any markup.

use serde::{Deserialize, Serialize};

/// Everything the extractor reads from an album page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedDocument {
    /// Rows of the properties table, in page order
    pub properties: Vec<PropertyRow>,
    /// Rows of the tracklist, in page order
    pub tracks: Vec<TrackRow>,
}

/// One two-cell row of the properties table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRow {
    /// Text of the first cell, e.g. `Release date`
    pub label: String,
    /// Whitespace-normalized text of the second cell
    pub text: String,
    /// Text directly inside the second cell, without nested annotations
    pub direct_text: String,
    /// Anchors found in the second cell
    pub links: Vec<ScrapedLink>,
}

impl PropertyRow {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: label.into(),
            direct_text: text.clone(),
            text,
            links: Vec::new(),
        }
    }

    /// The cell's own text if it has any, otherwise everything in it.
    pub fn primary_text(&self) -> &str {
        if self.direct_text.trim().is_empty() {
            &self.text
        } else {
            &self.direct_text
        }
    }

    pub fn with_link(mut self, text: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.push(ScrapedLink {
            text: text.into(),
            href: href.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedLink {
    pub text: String,
    pub href: String,
}

/// One `.tracklist-track` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRow {
    /// Displayed track number
    pub number: String,
    /// Text of the title link
    pub title: String,
    /// Text of the nested `<small>` artist annotation
    pub artist: String,
    /// Direct text of the title block, excluding nested elements, e.g. `(3:45)`
    pub duration: String,
}
