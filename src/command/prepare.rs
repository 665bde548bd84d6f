//! Leave a restart reason and context note for the next session to pick up.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::state::StateDir;

#[derive(Debug, Args)]
pub struct PrepareArgs {
    /// Why the session is being restarted
    #[arg(long)]
    pub reason: String,

    /// Snapshot of in-progress work to hand to the next session
    #[arg(long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read the context note from a file
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,
}

pub fn run(args: PrepareArgs) -> Result<()> {
    let config = Config::load()?;
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let state = StateDir::locate(&cwd, &config);

    let context = match (args.context, args.context_file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read context file {}", path.display()))?,
        ),
        (None, None) => None,
    };

    prepare_restart(&state, &args.reason, context.as_deref())?;
    println!("Restart note saved in {}", state.path().display());
    Ok(())
}

/// Write the pending restart files. An existing pending note is replaced.
pub fn prepare_restart(state: &StateDir, reason: &str, context: Option<&str>) -> Result<()> {
    if reason.trim().is_empty() {
        bail!("Restart reason must not be empty");
    }

    state.ensure()?;
    state.write_restart_reason(reason)?;
    if let Some(context) = context {
        state.write_context(context)?;
    }
    Ok(())
}
