//! CLI output formatting utilities.

use crate::tools::PaperEntry;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a numbered paper entry from a search result.
    pub fn paper(index: usize, entry: &PaperEntry) {
        println!(
            "\n{} {}",
            style(format!("{}.", index)).green().bold(),
            style(&entry.title).bold()
        );
        println!("   {}", style(entry.authors.join(", ")).dim());
        if !entry.categories.is_empty() {
            println!("   {}", style(entry.categories.join(", ")).cyan());
        }
        if let Some(link) = &entry.pdf_link {
            println!("   {}", style(link).underlined());
        }
        println!("   {}", summary_preview(&entry.summary, 300));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate an abstract with ellipsis.
fn summary_preview(summary: &str, max_len: usize) -> String {
    let flat = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_len {
        flat
    } else {
        let truncated: String = flat.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_preview_short() {
        assert_eq!(summary_preview("short abstract", 100), "short abstract");
    }

    #[test]
    fn test_summary_preview_flattens_whitespace() {
        assert_eq!(summary_preview("line one\n  line two", 100), "line one line two");
    }

    #[test]
    fn test_summary_preview_truncates() {
        let long = "word ".repeat(100);
        let preview = summary_preview(&long, 20);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 23);
    }
}
