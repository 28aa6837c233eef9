//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::ArxivClient;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    topic: &str,
    max_results: Option<u32>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let client = ArxivClient::new(&settings.arxiv);
    let max_results = max_results.unwrap_or(settings.arxiv.max_results);

    let spinner = Output::spinner("Searching arXiv...");
    let result = client.search(topic, max_results).await;
    spinner.finish_and_clear();

    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    Output::success(&format!(
        "Found {} paper(s) for '{}'",
        result.entries.len(),
        topic
    ));

    for (i, entry) in result.entries.iter().enumerate() {
        Output::paper(i + 1, entry);
    }
    println!();

    Ok(())
}
