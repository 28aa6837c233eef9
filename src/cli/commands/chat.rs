//! Interactive chat command with tool calling support.

use crate::agent::ChatSession;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::tools::ToolContext;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'forsk doctor' for detailed diagnostics.");
        return Err(e);
    }

    let model = model.unwrap_or_else(|| settings.chat.model.clone());
    let tools = ToolContext::new(&settings)?;

    let mut chat = match &settings.chat.system_prompt {
        Some(prompt) => ChatSession::with_system_prompt(
            tools,
            &model,
            settings.chat.max_tool_iterations,
            prompt,
        ),
        None => ChatSession::new(tools, &model, settings.chat.max_tool_iterations),
    };

    println!("\n{}", style("Forsk Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask about papers, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            chat.clear_history();
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let turn = chat.send_message(input).await;
        spinner.finish_and_clear();

        match turn {
            Ok(turn) => {
                for record in &turn.tool_calls {
                    println!("  {} {}", style(format!("[{}]", record.name)).dim(), style("✓").green());
                }
                println!("\n{} {}\n", style("Forsk:").cyan().bold(), turn.reply);

                if let Some(path) = chat.tools().last_artifact() {
                    if turn.tool_calls.iter().any(|r| r.name == "render_latex_pdf") {
                        Output::success(&format!("Generated PDF: {}", path.display()));
                        println!();
                    }
                }
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
