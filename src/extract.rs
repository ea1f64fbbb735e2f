//! Turning a scraped album page into a [`Release`].
//!
//! This is a pure function of the [`ScrapedDocument`]: the same document
//! always yields the same release.

use crate::document::{PropertyRow, ScrapedDocument, TrackRow};
use crate::mapping::{classify_link, resolve_label};
use crate::types::{LabelRef, LinkRef, Release, ReleaseType, Track};
use crate::{ImportError, Result};

/// Properties table labels the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyLabel {
    Name,
    Producers,
    Circle,
    Type,
    Labels,
    ReleaseDate,
    CatalogNumber,
    OfficialLinks,
    Unrecognized,
}

impl PropertyLabel {
    /// Every recognized label, with the text VocaDB shows for it.
    pub const RECOGNIZED: &'static [(&'static str, PropertyLabel)] = &[
        ("Name", PropertyLabel::Name),
        ("Producers", PropertyLabel::Producers),
        ("Circle", PropertyLabel::Circle),
        ("Type", PropertyLabel::Type),
        ("Label(s)", PropertyLabel::Labels),
        ("Release date", PropertyLabel::ReleaseDate),
        ("Catalog number", PropertyLabel::CatalogNumber),
        ("Official links", PropertyLabel::OfficialLinks),
    ];

    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        Self::RECOGNIZED
            .iter()
            .find(|(label, _)| *label == text)
            .map(|(_, kind)| *kind)
            .unwrap_or(PropertyLabel::Unrecognized)
    }
}

/// Rows collected before anything that depends on row order is resolved.
#[derive(Debug, Default)]
struct PartialRelease {
    title: Option<String>,
    artist: Option<String>,
    group: Option<String>,
    release_date: Option<String>,
    release_type: Option<ReleaseType>,
    label: Option<LabelRef>,
    catalog_number: Option<String>,
    links: Vec<LinkRef>,
}

impl PartialRelease {
    fn apply(&mut self, row: &PropertyRow) -> Result<()> {
        let kind = PropertyLabel::from_text(&row.label);
        log::debug!("Row {:?} -> {kind:?}", row.label);

        match kind {
            PropertyLabel::Name => self.title = non_empty(row.primary_text()),
            PropertyLabel::Producers => {
                let producers = producer_names(row);
                if producers.len() == 1 {
                    self.artist = producers.into_iter().next();
                } else {
                    log::debug!(
                        "{} producers listed, leaving primary artist unset",
                        producers.len()
                    );
                }
            }
            PropertyLabel::Circle => self.group = non_empty(&row.text),
            PropertyLabel::Type => {
                self.release_type = non_empty(&row.text).map(|text| ReleaseType::from_label(&text))
            }
            PropertyLabel::Labels => {
                self.label = first_label_name(row).map(|name| resolve_label(&name))
            }
            PropertyLabel::ReleaseDate => self.release_date = non_empty(&row.text),
            PropertyLabel::CatalogNumber => self.catalog_number = non_empty(&row.text),
            PropertyLabel::OfficialLinks => {
                for link in &row.links {
                    if let Some(link) = classify_link(&link.href)? {
                        self.links.push(link);
                    }
                }
            }
            PropertyLabel::Unrecognized => {}
        }

        Ok(())
    }

    /// Resolve the collected rows. The catalog number is attached here so it
    /// does not matter whether it came before or after the label row.
    fn finish(self, tracks: Vec<Track>) -> Result<Release> {
        let title = self
            .title
            .ok_or_else(|| ImportError::Parse("Missing Name row".to_string()))?;

        let label = match (self.label, self.catalog_number) {
            (Some(mut label), catalog_number) => {
                label.catalog_number = catalog_number;
                Some(label)
            }
            (None, Some(catalog_number)) => Some(LabelRef {
                catalog_number: Some(catalog_number),
                ..Default::default()
            }),
            (None, None) => None,
        };

        Ok(Release {
            title,
            artist: self.artist,
            group: self.group,
            release_date: self.release_date,
            release_type: self.release_type,
            label,
            tracks,
            links: self.links,
        })
    }
}

/// Build a release from a scraped album page.
pub fn extract_release(document: &ScrapedDocument) -> Result<Release> {
    let mut partial = PartialRelease::default();
    for row in &document.properties {
        partial.apply(row)?;
    }

    let tracks = extract_tracks(&document.tracks);
    partial.finish(tracks)
}

/// Convert tracklist rows into tracks numbered by source order.
pub fn extract_tracks(rows: &[TrackRow]) -> Vec<Track> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let position = index as u32 + 1;
            if row.number.trim() != position.to_string() {
                log::debug!(
                    "Track {position} is numbered {:?} on the page (multi-disc?)",
                    row.number
                );
            }
            Track {
                position,
                title: row.title.trim().to_string(),
                artist: row.artist.trim().to_string(),
                duration: strip_parens(&row.duration).to_string(),
            }
        })
        .collect()
}

/// Producer names listed in a `Producers` row: the anchors if there are
/// any, otherwise the comma separated text.
fn producer_names(row: &PropertyRow) -> Vec<String> {
    if !row.links.is_empty() {
        return row
            .links
            .iter()
            .filter_map(|link| non_empty(&link.text))
            .collect();
    }
    row.text.split(',').filter_map(non_empty).collect()
}

/// The first label in a `Label(s)` row: the first anchor if there is one,
/// otherwise the whole cell text.
fn first_label_name(row: &PropertyRow) -> Option<String> {
    match row.links.first() {
        Some(link) => non_empty(&link.text),
        None => non_empty(&row.text),
    }
}

fn strip_parens(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(text)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
