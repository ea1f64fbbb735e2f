mod common;

use common::ALBUM_PAGE;
use vocadb_mb_import::mapping::KARENT_MBID;
use vocadb_mb_import::{
    scrape_release, Html, MappedRelease, ReleaseType, Result, SubmissionForm, VocaDbParser,
};

#[test]
fn test_scrape_fixture_release() -> Result<()> {
    let release = scrape_release(ALBUM_PAGE)?;

    assert_eq!(release.title, "Midnight Signal");
    assert_eq!(release.artist.as_deref(), Some("nightwalkerP"));
    assert_eq!(release.group, None);
    assert_eq!(release.release_type, Some(ReleaseType::Ep));
    assert_eq!(release.release_date.as_deref(), Some("10/14/2020"));

    let label = release.label.as_ref().expect("label should be set");
    assert_eq!(label.name.as_deref(), Some("KARENT"));
    assert_eq!(label.mbid.as_deref(), Some(KARENT_MBID));
    assert_eq!(label.catalog_number.as_deref(), Some("KRT-0042"));

    Ok(())
}

#[test]
fn test_scrape_fixture_tracks() -> Result<()> {
    let release = scrape_release(ALBUM_PAGE)?;

    assert_eq!(release.tracks.len(), 3);
    let positions: Vec<u32> = release.tracks.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    let first = &release.tracks[0];
    assert_eq!(first.title, "Midnight Signal");
    assert_eq!(first.duration, "3:45");
    assert_eq!(first.artist, "nightwalkerP feat. Hatsune Miku");

    assert_eq!(release.tracks[1].title, "Static & Stars");
    assert_eq!(release.tracks[2].title, "Afterglow (Instrumental)");
    assert_eq!(release.tracks[2].duration, "3:44");

    Ok(())
}

#[test]
fn test_scrape_fixture_links() -> Result<()> {
    let release = scrape_release(ALBUM_PAGE)?;

    let links: Vec<(&str, &[u32])> = release
        .links
        .iter()
        .map(|link| (link.url.as_str(), link.link_types.as_slice()))
        .collect();
    assert_eq!(
        links,
        vec![
            (
                "https://nightwalker.bandcamp.com/album/midnight-signal",
                &[85, 74][..]
            ),
            ("https://open.spotify.com/album/4abc", &[85][..]),
        ]
    );

    Ok(())
}

#[test]
fn test_circle_overrides_producer_credit() -> Result<()> {
    let page = ALBUM_PAGE.replace(
        "<td>Type</td>",
        "<td>Circle</td><td><a href=\"/Ar/900\">Night Circle</a></td></tr><tr><td>Type</td>",
    );
    let release = scrape_release(&page)?;
    assert_eq!(release.group.as_deref(), Some("Night Circle"));

    let form = SubmissionForm::from_release(&MappedRelease::from_release(release)?, None);
    assert_eq!(
        form.get("artist_credit.names.0.artist.name"),
        Some("Night Circle")
    );

    Ok(())
}

#[test]
fn test_extraction_is_idempotent() -> Result<()> {
    let document = Html::parse_document(ALBUM_PAGE);
    let parser = VocaDbParser::new();

    let first = vocadb_mb_import::extract_release(&parser.parse_album_page(&document)?)?;
    let second = vocadb_mb_import::extract_release(&parser.parse_album_page(&document)?)?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_fixture_form_fields() -> Result<()> {
    let release = scrape_release(ALBUM_PAGE)?;
    let track_count = release.tracks.len();
    let pair_count: usize = release.links.iter().map(|l| l.link_types.len()).sum();

    let mapped = MappedRelease::from_release(release)?;
    let form = SubmissionForm::from_release(&mapped, Some("https://vocadb.net/Al/4242"));

    assert_eq!(form.get("name"), Some("Midnight Signal"));
    assert_eq!(
        form.get("artist_credit.names.0.artist.name"),
        Some("nightwalkerP")
    );
    assert_eq!(form.get("events.0.date.year"), Some("2020"));
    assert_eq!(form.get("events.0.date.month"), Some("10"));
    assert_eq!(form.get("events.0.date.day"), Some("14"));
    assert_eq!(form.get("type"), Some("EP"));
    assert_eq!(form.get("labels.0.name"), Some("KARENT"));
    assert_eq!(form.get("labels.0.mbid"), Some(KARENT_MBID));
    assert_eq!(form.get("labels.0.catalog_number"), Some("KRT-0042"));
    assert_eq!(
        form.get("edit_note"),
        Some("Imported from https://vocadb.net/Al/4242")
    );

    let track_groups = form
        .fields()
        .iter()
        .filter(|(key, _)| key.starts_with("mediums.0.track.") && key.ends_with(".name") && !key.contains("artist_credit"))
        .count();
    assert_eq!(track_groups, track_count);
    assert_eq!(form.get("mediums.0.track.0.length"), Some("3:45"));
    assert_eq!(form.get("mediums.0.track.2.name"), Some("Afterglow (Instrumental)"));

    let url_indices: Vec<usize> = form
        .fields()
        .iter()
        .filter_map(|(key, _)| key.strip_prefix("urls.")?.strip_suffix(".url")?.parse().ok())
        .collect();
    assert_eq!(url_indices.len(), pair_count);
    assert_eq!(url_indices, (0..pair_count).collect::<Vec<_>>());

    Ok(())
}

#[test]
fn test_malformed_date_stops_before_form() {
    let page = ALBUM_PAGE.replace("10/14/2020", "sometime in autumn");
    let release = scrape_release(&page).expect("page should still extract");

    match MappedRelease::from_release(release) {
        Err(vocadb_mb_import::ImportError::InvalidDate(text)) => {
            assert_eq!(text, "sometime in autumn")
        }
        other => panic!("Expected invalid date error, got: {other:?}"),
    }
}

#[test]
fn test_serializes_release_as_json() -> Result<()> {
    let release = scrape_release(ALBUM_PAGE)?;
    let json = serde_json::to_value(&release)?;

    assert_eq!(json["title"], "Midnight Signal");
    assert_eq!(json["release_type"], "EP");
    assert_eq!(json["tracks"][1]["position"], 2);
    Ok(())
}
