//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::LatexRenderer;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Forsk Setup");
    println!();
    println!("Welcome to Forsk! Let's make sure everything is configured correctly.\n");

    // Step 1: Check prerequisites
    println!("{}", style("Step 1: Checking prerequisites").bold().cyan());
    println!();

    let engine = LatexRenderer::new(&settings.latex)
        .ok()
        .and_then(|r| r.resolve_engine());

    match &engine {
        Some(engine) => {
            Output::success(&format!("LaTeX engine found: {}", engine));
        }
        None => {
            Output::warning("No LaTeX engine found. PDF rendering will not work.");
            println!();
            println!("  Install a TeX distribution to enable 'forsk render' and the");
            println!("  render_latex_pdf agent tool:");
            println!("    {}", style(install_hint()).dim());
            println!();

            if !prompt_continue("Continue anyway?")? {
                println!();
                Output::info("Setup cancelled. Install a LaTeX engine and run 'forsk init' again.");
                return Ok(());
            }
        }
    }

    println!();

    // Step 2: Check API key
    println!("{}", style("Step 2: Checking API configuration").bold().cyan());
    println!();

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  Forsk requires an OpenAI API key for chat and agent runs.");
        println!(
            "  Get your API key from: {}",
            style("https://platform.openai.com/api-keys").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'forsk init' again.");
            return Ok(());
        }
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 3: Create directories
    println!("{}", style("Step 3: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    let output_dir = settings.output_dir();

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)?;
        Output::success(&format!("Created output directory: {}", output_dir.display()));
    } else {
        Output::info(&format!("Output directory exists: {}", output_dir.display()));
    }

    println!();

    // Step 4: Create config file
    println!("{}", style("Step 4: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("forsk config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("forsk doctor").cyan());
    println!("  {} Search for papers", style("forsk search \"<topic>\"").cyan());
    println!("  {} Chat with the research assistant", style("forsk chat").cyan());
    println!();
    println!("For more help: {}", style("forsk --help").cyan());

    Ok(())
}

/// Platform-specific install hint for a LaTeX distribution.
fn install_hint() -> &'static str {
    if cfg!(target_os = "macos") {
        "brew install --cask mactex"
    } else if cfg!(target_os = "linux") {
        "sudo apt install texlive-latex-base"
    } else {
        "https://miktex.org/download"
    }
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_hint_nonempty() {
        assert!(!install_hint().is_empty());
    }
}
