//! Render command implementation - LaTeX to PDF.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::LatexRenderer;
use anyhow::Result;
use std::io::Read;

/// Run the render command.
pub async fn run_render(input: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Render, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'forsk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let latex_source = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    let renderer = LatexRenderer::new(&settings.latex)?;

    let spinner = Output::spinner("Compiling LaTeX...");
    let result = renderer.render(&latex_source).await;
    spinner.finish_and_clear();

    let pdf_path = result?;
    Output::success(&format!("Rendered PDF: {}", pdf_path.display()));

    Ok(())
}
