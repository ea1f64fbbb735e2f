pub mod extract;
pub mod form;
pub mod import;
pub mod utils;

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Where the generated submission form goes
#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Write the auto-submitting HTML page to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the urlencoded POST body instead of an HTML page
    #[arg(long)]
    pub body: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait for an album page to render, then build the MusicBrainz form
    ///
    /// The page is re-fetched every interval until the tracklist appears or
    /// the maximum wait runs out.
    ///
    /// Usage examples:
    /// # Build a form for an album and save it as a page to open in a browser
    /// vocadb-mb-import import https://vocadb.net/Al/12345 --output import.html
    ///
    /// # Poll faster and give up sooner
    /// vocadb-mb-import import https://vocadb.net/Al/12345 --interval-ms 200 --max-wait-ms 3000
    Import {
        /// Album page URL
        url: String,

        /// Delay between checks for the tracklist, in milliseconds
        #[arg(long, default_value = "500")]
        interval_ms: u64,

        /// Give up after this many milliseconds without a tracklist
        #[arg(long, default_value = "10000")]
        max_wait_ms: u64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build the MusicBrainz form from a page right away, without polling
    ///
    /// Usage examples:
    /// # Use an album page saved from the browser
    /// vocadb-mb-import form saved-album.html --output import.html
    ///
    /// # Print the POST body
    /// vocadb-mb-import form saved-album.html --body
    Form {
        /// Saved album page path, or an album page URL
        source: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the release scraped from a page as JSON
    ///
    /// Usage examples:
    /// vocadb-mb-import extract saved-album.html
    Extract {
        /// Saved album page path, or an album page URL
        source: String,
    },
}

/// Execute the appropriate command handler based on the parsed command
pub async fn execute_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Import {
            url,
            interval_ms,
            max_wait_ms,
            output,
        } => import::handle_import_command(&url, interval_ms, max_wait_ms, &output).await,

        Commands::Form { source, output } => form::handle_form_command(&source, &output).await,

        Commands::Extract { source } => extract::handle_extract_command(&source).await,
    }
}
