use super::utils::page_source;
use vocadb_mb_import::{scrape_release, PageSource};

/// Print the scraped release as pretty JSON
pub async fn handle_extract_command(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = page_source(source);
    let html = source.fetch_page().await?;
    let release = scrape_release(&html)?;

    println!("{}", serde_json::to_string_pretty(&release)?);
    Ok(())
}
