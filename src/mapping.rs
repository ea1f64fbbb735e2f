//! Normalization of scraped values into MusicBrainz's vocabulary.
//!
//! Label aliases, link classification and release date parsing all live here.

use crate::types::{LabelRef, LinkRef, Release};
use crate::{ImportError, Result};
use chrono::{Datelike, NaiveDate};
use http_types::Url;
use serde::{Deserialize, Serialize};

/// MusicBrainz MBID of the KARENT label.
pub const KARENT_MBID: &str = "0e5cd1b1-e2e2-4a0b-8b1e-7d2e1c5f0d6a";

/// Labels whose MusicBrainz identity is known without a lookup.
const LABEL_ALIASES: &[(&str, &str)] = &[("KARENT", KARENT_MBID)];

/// MusicBrainz release link type codes, by classification name.
pub const LINK_TYPE_CODES: &[(&str, u32)] = &[
    // "free streaming"
    ("stream", 85),
    // "purchase for download"
    ("purchase", 74),
];

/// A domain and the classifications links on it are submitted under.
#[derive(Debug, Clone, Copy)]
pub struct LinkRule {
    /// Lowercase host name
    pub domain: &'static str,
    /// Whether hosts ending in `.{domain}` match too
    pub subdomains: bool,
    pub classifications: &'static [&'static str],
}

impl LinkRule {
    fn matches_host(&self, host: &str) -> bool {
        host == self.domain
            || (self.subdomains
                && host
                    .strip_suffix(self.domain)
                    .is_some_and(|prefix| prefix.ends_with('.')))
    }
}

pub const LINK_RULES: &[LinkRule] = &[
    LinkRule {
        domain: "bandcamp.com",
        subdomains: true,
        classifications: &["stream", "purchase"],
    },
    LinkRule {
        domain: "open.spotify.com",
        subdomains: false,
        classifications: &["stream"],
    },
];

/// Resolve a label name against the alias table.
///
/// A case-insensitive alias match yields the canonical name and its MBID;
/// anything else keeps the raw text as the name.
pub fn resolve_label(name: &str) -> LabelRef {
    let name = name.trim();
    match LABEL_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
    {
        Some((alias, mbid)) => LabelRef {
            name: Some(alias.to_string()),
            mbid: Some(mbid.to_string()),
            catalog_number: None,
        },
        None => LabelRef {
            name: Some(name.to_string()),
            mbid: None,
            catalog_number: None,
        },
    }
}

/// Look up the MusicBrainz code for a classification name.
///
/// An unknown name means the rule table is inconsistent, so this is a hard
/// error rather than a dropped link.
pub fn link_type_code(classification: &str) -> Result<u32> {
    LINK_TYPE_CODES
        .iter()
        .find(|(name, _)| *name == classification)
        .map(|(_, code)| *code)
        .ok_or_else(|| ImportError::UnknownLinkType(classification.to_string()))
}

/// Classify a URL by the first matching rule.
///
/// Returns `Ok(None)` for URLs no rule recognizes.
pub fn classify_link(url: &str) -> Result<Option<LinkRef>> {
    classify_link_with(LINK_RULES, url)
}

pub fn classify_link_with(rules: &[LinkRule], url: &str) -> Result<Option<LinkRef>> {
    let url = url.trim();
    let host = match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            parsed.host_str().map(str::to_ascii_lowercase)
        }
        _ => None,
    };
    let Some(host) = host else {
        log::debug!("Dropping link without an http(s) host: {url}");
        return Ok(None);
    };

    let Some(rule) = rules.iter().find(|rule| rule.matches_host(&host)) else {
        log::debug!("Dropping unrecognized link: {url}");
        return Ok(None);
    };

    let link_types = rule
        .classifications
        .iter()
        .map(|name| link_type_code(name))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(LinkRef {
        url: url.to_string(),
        link_types,
    }))
}

/// A calendar date split into the parts MusicBrainz seeds separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
    pub day: u32,
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

impl ReleaseDate {
    /// Parse displayed date text as a calendar date.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let date = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .ok_or_else(|| ImportError::InvalidDate(text.to_string()))?;

        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }
}

/// A release with every field resolved to what gets submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedRelease {
    pub release: Release,
    pub date: ReleaseDate,
    pub artist_credit: Option<String>,
}

impl MappedRelease {
    /// Resolve the release date and artist credit of a scraped release.
    ///
    /// A missing or unparseable date fails the whole mapping, so a form is
    /// never produced with bogus date fields.
    pub fn from_release(release: Release) -> Result<Self> {
        let date = match release.release_date.as_deref() {
            Some(text) => ReleaseDate::parse(text)?,
            None => return Err(ImportError::InvalidDate(String::new())),
        };
        let artist_credit = release.artist_credit().map(str::to_string);

        Ok(Self {
            release,
            date,
            artist_credit,
        })
    }
}
