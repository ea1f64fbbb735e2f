use super::OutputArgs;
use std::fs;
use vocadb_mb_import::{FilePageSource, HttpPageSource, PageSource, SubmissionForm};

/// Treat `source` as a URL if it looks like one, otherwise as a file path.
pub fn page_source(source: &str) -> Box<dyn PageSource> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let http_client = http_client::native::NativeClient::new();
        Box::new(HttpPageSource::new(Box::new(http_client), source))
    } else {
        Box::new(FilePageSource::new(source))
    }
}

/// Write the form wherever the output flags say.
pub fn write_form(
    form: &SubmissionForm,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = if output.body {
        form.encode_body()
    } else {
        form.to_html()
    };

    match &output.output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!(
                "✅ Wrote {} fields to {} (open it in a browser to submit)",
                form.fields().len(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
