use super::utils::{page_source, write_form};
use super::OutputArgs;
use vocadb_mb_import::Importer;

/// Build the form from the page as it is now, skipping the poll
pub async fn handle_form_command(
    source: &str,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = page_source(source);
    let mut importer = Importer::new(Default::default());

    let form = importer.run_on_demand(source.as_ref()).await?;
    write_form(&form, output)
}
