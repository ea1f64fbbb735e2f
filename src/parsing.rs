//! HTML parsing for VocaDB album pages.
//!
//! Turns a rendered page into a [`ScrapedDocument`]. Only structure is read
//! here; deciding what each row means is left to the extractor.

use crate::document::{PropertyRow, ScrapedDocument, ScrapedLink, TrackRow};
use crate::{ImportError, Result};
use scraper::{ElementRef, Html, Selector};

/// Class carried by every tracklist row once the page has rendered.
pub const TRACK_SELECTOR: &str = ".tracklist-track";

/// Stateless parser for VocaDB album markup.
#[derive(Debug, Clone, Default)]
pub struct VocaDbParser;

impl VocaDbParser {
    pub fn new() -> Self {
        Self
    }

    /// Whether the page contains at least one element matching `marker`.
    pub fn has_marker(&self, document: &Html, marker: &str) -> Result<bool> {
        let selector = selector(marker)?;
        Ok(document.select(&selector).next().is_some())
    }

    /// Read the properties table and tracklist of an album page.
    pub fn parse_album_page(&self, document: &Html) -> Result<ScrapedDocument> {
        let properties = self.parse_properties(document)?;
        let tracks = self.parse_tracks(document)?;

        log::debug!(
            "Parsed {} property rows and {} tracks",
            properties.len(),
            tracks.len()
        );

        Ok(ScrapedDocument { properties, tracks })
    }

    /// Parse the `.properties` table into label/value rows.
    pub fn parse_properties(&self, document: &Html) -> Result<Vec<PropertyRow>> {
        let table_selector = selector("table.properties, .properties")?;
        let row_selector = selector("tbody > tr")?;
        let cell_selector = selector("td")?;
        let link_selector = selector("a[href]")?;

        let table = document
            .select(&table_selector)
            .next()
            .ok_or_else(|| ImportError::Parse("Missing properties table".to_string()))?;

        let mut rows = Vec::new();
        for row in table.select(&row_selector) {
            let mut cells = row.select(&cell_selector);
            let (Some(label_cell), Some(value_cell)) = (cells.next(), cells.next()) else {
                log::debug!("Skipping properties row without two cells");
                continue;
            };

            let links = value_cell
                .select(&link_selector)
                .filter_map(|anchor| {
                    anchor.value().attr("href").map(|href| ScrapedLink {
                        text: normalized_text(&anchor),
                        href: href.trim().to_string(),
                    })
                })
                .collect();

            rows.push(PropertyRow {
                label: normalized_text(&label_cell),
                text: normalized_text(&value_cell),
                direct_text: direct_text(&value_cell),
                links,
            });
        }

        Ok(rows)
    }

    /// Parse every `.tracklist-track` element, in page order.
    pub fn parse_tracks(&self, document: &Html) -> Result<Vec<TrackRow>> {
        let track_selector = selector(TRACK_SELECTOR)?;
        let number_selector = selector(".tracklist-trackNumber")?;
        let title_block_selector = selector(".tracklist-trackTitle")?;
        let artist_selector = selector("small")?;
        let title_selector = selector("span a")?;

        let mut tracks = Vec::new();
        for (index, track) in document.select(&track_selector).enumerate() {
            let missing =
                |what: &str| ImportError::Parse(format!("Track {}: missing {what}", index + 1));

            let number = track
                .select(&number_selector)
                .next()
                .ok_or_else(|| missing("track number"))?;
            let title_block = track
                .select(&title_block_selector)
                .next()
                .ok_or_else(|| missing("title block"))?;
            let artist = title_block
                .select(&artist_selector)
                .next()
                .ok_or_else(|| missing("artist"))?;
            let title = title_block
                .select(&title_selector)
                .next()
                .ok_or_else(|| missing("title link"))?;

            tracks.push(TrackRow {
                number: normalized_text(&number),
                title: normalized_text(&title),
                artist: normalized_text(&artist),
                duration: direct_text(&title_block),
            });
        }

        Ok(tracks)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ImportError::Parse(format!("Invalid selector {css:?}: {e}")))
}

/// All descendant text with runs of whitespace collapsed.
fn normalized_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text nodes that are immediate children of `element`, ignoring anything
/// nested in child elements.
pub fn direct_text(element: &ElementRef) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_text_excludes_children() {
        let html = Html::parse_fragment(
            r#"<div class="t"><span><a href="/S/1">Song</a></span> (4:01) <small>Artist</small></div>"#,
        );
        let sel = selector(".t").unwrap();
        let block = html.select(&sel).next().unwrap();
        assert_eq!(direct_text(&block), "(4:01)");
    }

    #[test]
    fn test_has_marker() {
        let parser = VocaDbParser::new();
        let loading = Html::parse_document("<html><body><div id=app>Loading</div></body></html>");
        let ready = Html::parse_document(
            r#"<html><body><div class="tracklist-track"></div></body></html>"#,
        );

        assert!(!parser.has_marker(&loading, TRACK_SELECTOR).unwrap());
        assert!(parser.has_marker(&ready, TRACK_SELECTOR).unwrap());
    }

    #[test]
    fn test_missing_properties_table() {
        let parser = VocaDbParser::new();
        let document = Html::parse_document("<html><body><p>nothing</p></body></html>");
        match parser.parse_album_page(&document) {
            Err(ImportError::Parse(msg)) => assert!(msg.contains("properties")),
            other => panic!("Expected parse error, got: {other:?}"),
        }
    }

    #[test]
    fn test_track_missing_title_is_error() {
        let parser = VocaDbParser::new();
        let document = Html::parse_document(
            r#"<table class="properties"><tbody></tbody></table>
            <div class="tracklist-track">
              <div class="tracklist-trackNumber">1</div>
              <div class="tracklist-trackTitle">(1:00) <small>A</small></div>
            </div>"#,
        );
        assert!(matches!(
            parser.parse_tracks(&document),
            Err(ImportError::Parse(_))
        ));
    }
}
