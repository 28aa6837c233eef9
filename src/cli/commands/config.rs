//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let mut settings = settings;
            set_value(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            // Try to open in editor
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment to settings.
fn set_value(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "general.data_dir" => settings.general.data_dir = value.to_string(),
        "general.log_level" => settings.general.log_level = value.to_string(),
        "arxiv.base_url" => settings.arxiv.base_url = value.to_string(),
        "arxiv.max_results" => settings.arxiv.max_results = value.parse()?,
        "arxiv.timeout_seconds" => settings.arxiv.timeout_seconds = value.parse()?,
        "latex.output_dir" => settings.latex.output_dir = value.to_string(),
        // Comma-separated list of engine candidates, tried in order
        "latex.engines" => {
            settings.latex.engines = value
                .split(',')
                .map(|engine| engine.trim().to_string())
                .filter(|engine| !engine.is_empty())
                .collect();
        }
        "chat.model" => settings.chat.model = value.to_string(),
        "chat.max_tool_iterations" => settings.chat.max_tool_iterations = value.parse()?,
        // An empty value restores the built-in prompt
        "chat.system_prompt" => {
            settings.chat.system_prompt = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'forsk config show' to list available keys.",
            key
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_model() {
        let mut settings = Settings::default();
        set_value(&mut settings, "chat.model", "gpt-4o-mini").unwrap();
        assert_eq!(settings.chat.model, "gpt-4o-mini");
    }

    #[test]
    fn test_set_value_parses_numbers() {
        let mut settings = Settings::default();
        set_value(&mut settings, "arxiv.max_results", "10").unwrap();
        assert_eq!(settings.arxiv.max_results, 10);
        assert!(set_value(&mut settings, "arxiv.max_results", "lots").is_err());
    }

    #[test]
    fn test_set_value_engines_list() {
        let mut settings = Settings::default();
        set_value(&mut settings, "latex.engines", "xelatex, pdflatex").unwrap();
        assert_eq!(settings.latex.engines, vec!["xelatex", "pdflatex"]);
    }

    #[test]
    fn test_set_value_system_prompt() {
        let mut settings = Settings::default();
        set_value(&mut settings, "chat.system_prompt", "You are terse.").unwrap();
        assert_eq!(settings.chat.system_prompt.as_deref(), Some("You are terse."));

        set_value(&mut settings, "chat.system_prompt", "").unwrap();
        assert_eq!(settings.chat.system_prompt, None);
    }

    #[test]
    fn test_set_value_unknown_key() {
        let mut settings = Settings::default();
        assert!(set_value(&mut settings, "nope.nothing", "x").is_err());
    }
}
