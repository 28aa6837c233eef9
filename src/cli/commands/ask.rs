//! Ask command - one-shot agent run.

use crate::agent::Agent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::ToolContext;
use anyhow::Result;
use console::style;

/// Run the ask command.
pub async fn run_ask(task: &str, model: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'forsk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let model = model.unwrap_or_else(|| settings.chat.model.clone());
    let tools = ToolContext::new(&settings)?;

    let mut agent = Agent::new(tools, &model);
    if let Some(prompt) = &settings.chat.system_prompt {
        agent = agent.with_system_prompt(prompt);
    }

    let spinner = Output::spinner("Researching...");
    let response = agent.run(task).await;
    spinner.finish_and_clear();

    let response = response?;

    if !response.tool_calls.is_empty() {
        println!("{}", style("Tool calls:").dim());
        for record in &response.tool_calls {
            println!("  {}", style(format!("{}", record)).dim());
        }
        println!();
    }

    if response.content.is_empty() {
        Output::warning("The agent returned no text response.");
    } else {
        println!("{}", response.content);
    }

    if let Some(path) = agent.tools().last_artifact() {
        println!();
        Output::success(&format!("Generated PDF: {}", path.display()));
    }

    Ok(())
}
