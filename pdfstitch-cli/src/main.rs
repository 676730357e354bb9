//! pdfstitch - Stitch PDF files into a single document.

mod cli;

use clap::Parser;
use std::process;

use crate::cli::Cli;
use pdfstitch::error::StitchError;
use pdfstitch::output::OutputFormatter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), StitchError> {
    let config = cli.to_config();
    let formatter = OutputFormatter::from_config(&config);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", pdfstitch::NAME, pdfstitch::VERSION));
        formatter.blank_line();
    }

    let report = pdfstitch::stitch_pdfs(&config, &formatter).await?;

    if config.json {
        let json = report
            .to_json()
            .map_err(|e| StitchError::Io {
                source: std::io::Error::other(e),
            })?;
        println!("{json}");
    }

    Ok(())
}
