//! Global configuration management commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use std::fs;
use std::process::Command;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Open the global configuration file in your editor ($VISUAL, $EDITOR, or vi)
    Edit,
    /// Print the path to the global configuration file
    Path,
    /// Print the effective configuration, defaults filled in
    Show,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Edit => run_edit(),
        ConfigCommand::Path => run_path(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_edit() -> Result<()> {
    let config_path =
        crate::config::global_config_path().context("Could not determine config directory")?;

    // Ensure directory exists
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    // Create default config if it doesn't exist
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_GLOBAL_CONFIG)
            .with_context(|| format!("Failed to create {}", config_path.display()))?;
        println!("Created {}", config_path.display());
    }

    // Determine editor: $VISUAL -> $EDITOR -> vi
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    // Split editor string to handle values like "code --wait"
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let (cmd, args) = parts.split_first().context("Editor variable is empty")?;

    let status = Command::new(cmd)
        .args(args)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor '{}'", editor))?;

    if !status.success() {
        bail!("Editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let config_path =
        crate::config::global_config_path().context("Could not determine config directory")?;
    println!("{}", config_path.display());
    Ok(())
}

fn run_show() -> Result<()> {
    let config = crate::config::Config::load()?;
    print!("{}", effective_yaml(&config)?);
    Ok(())
}

/// Render the config with every field resolved to its effective value.
fn effective_yaml(config: &crate::config::Config) -> Result<String> {
    let resolved = crate::config::Config {
        marker_dir: Some(config.marker_dir().to_string()),
        state_dir: Some(config.state_dir().to_string()),
        session_id_env: Some(config.session_id_env().to_string()),
    };
    Ok(serde_yaml::to_string(&resolved)?)
}

const DEFAULT_GLOBAL_CONFIG: &str = r#"# self-reborn global configuration
# Every setting is optional; the values shown are the defaults.

# Directory whose presence marks a project root
# marker_dir: .claude

# Subdirectory of the marker directory holding hook state
# state_dir: self-reborn

# Environment variable carrying the ending session's id
# session_id_env: CLAUDE_SESSION_ID
"#;
