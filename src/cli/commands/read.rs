//! Read command implementation - PDF text extraction.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::PdfReader;
use anyhow::Result;

/// Run the read command.
pub async fn run_read(url: &str, output: Option<String>, settings: Settings) -> Result<()> {
    let reader = PdfReader::new(settings.arxiv.timeout_seconds);

    let spinner = Output::spinner("Fetching and extracting PDF...");
    let text = reader.extract_text(url).await;
    spinner.finish_and_clear();

    let text = text?;

    match output {
        Some(path) => {
            std::fs::write(&path, &text)?;
            Output::success(&format!(
                "Wrote {} characters of text to {}",
                text.len(),
                path
            ));
        }
        None => {
            println!("{}", text);
        }
    }

    Ok(())
}
