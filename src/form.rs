//! MusicBrainz release editor seeding.
//!
//! A [`SubmissionForm`] holds the POST fields for `/release/add` in the order
//! they are generated, and can render itself as a page that submits on load.

use crate::mapping::MappedRelease;
use crate::types::{LinkRef, Track};

/// Where the release editor accepts seeded POSTs.
pub const RELEASE_ADD_URL: &str = "https://musicbrainz.org/release/add";

/// An auto-submitting form targeting the MusicBrainz release editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionForm {
    action: String,
    fields: Vec<(String, String)>,
}

impl SubmissionForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    /// Build the seeding form for a mapped release.
    ///
    /// `source_url`, when given, is recorded in the edit note.
    pub fn from_release(mapped: &MappedRelease, source_url: Option<&str>) -> Self {
        let release = &mapped.release;
        let mut form = Self::new(RELEASE_ADD_URL);

        form.push("name", &release.title);
        if let Some(credit) = &mapped.artist_credit {
            form.push("artist_credit.names.0.artist.name", credit);
        }

        form.push("events.0.date.year", mapped.date.year.to_string());
        form.push("events.0.date.month", mapped.date.month.to_string());
        form.push("events.0.date.day", mapped.date.day.to_string());

        if let Some(release_type) = &release.release_type {
            form.push("type", release_type.as_str());
        }

        if let Some(label) = &release.label {
            if let Some(name) = &label.name {
                form.push("labels.0.name", name);
            }
            if let Some(mbid) = &label.mbid {
                form.push("labels.0.mbid", mbid);
            }
            if let Some(catalog_number) = &label.catalog_number {
                form.push("labels.0.catalog_number", catalog_number);
            }
        }

        for track in &release.tracks {
            form.push_track(track);
        }
        form.push_links(&release.links);

        if let Some(url) = source_url {
            form.push("edit_note", format!("Imported from {url}"));
        }

        form
    }

    fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    fn push_track(&mut self, track: &Track) {
        let prefix = format!("mediums.0.track.{}", track.position.saturating_sub(1));
        self.push(format!("{prefix}.name"), &track.title);
        self.push(format!("{prefix}.length"), &track.duration);
        self.push(format!("{prefix}.artist_credit.names.0.name"), &track.artist);
    }

    /// One url/link_type pair per code, with a single index shared by every
    /// link. A URL carrying two codes appears twice; MusicBrainz merges them.
    fn push_links(&mut self, links: &[LinkRef]) {
        let pairs = links
            .iter()
            .flat_map(|link| link.link_types.iter().map(move |code| (&link.url, code)));
        for (index, (url, code)) in pairs.enumerate() {
            self.push(format!("urls.{index}.url"), url);
            self.push(format!("urls.{index}.link_type"), code.to_string());
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Encode the fields as an `application/x-www-form-urlencoded` body.
    pub fn encode_body(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Render a standalone page that posts the form into a new browsing
    /// context as soon as it loads.
    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Import to MusicBrainz</title></head>\n<body>\n",
        );
        html.push_str(&format!(
            "<form id=\"mb-import\" method=\"post\" target=\"_blank\" accept-charset=\"UTF-8\" action=\"{}\">\n",
            escape_html(&self.action)
        ));
        for (name, value) in &self.fields {
            html.push_str(&format!(
                "  <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
                escape_html(name),
                escape_html(value)
            ));
        }
        html.push_str("  <button type=\"submit\">Import into MusicBrainz</button>\n</form>\n");
        html.push_str("<script>document.getElementById(\"mb-import\").submit();</script>\n");
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
