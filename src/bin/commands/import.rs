use super::utils::{page_source, write_form};
use super::OutputArgs;
use std::time::Duration;
use vocadb_mb_import::{ImportOutcome, Importer, PollConfig};

/// Poll an album page until it renders, then emit the form
pub async fn handle_import_command(
    url: &str,
    interval_ms: u64,
    max_wait_ms: u64,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = PollConfig {
        interval: Duration::from_millis(interval_ms),
        max_wait: Duration::from_millis(max_wait_ms),
        ..Default::default()
    };

    let source = page_source(url);
    let mut importer = Importer::new(config);

    match importer.run(source.as_ref()).await? {
        ImportOutcome::Emitted(form) => write_form(&form, output),
        ImportOutcome::TimedOut => {
            Err(format!("Tracklist did not appear on {url} within {max_wait_ms}ms").into())
        }
    }
}
