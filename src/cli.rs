use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::command;

#[derive(Parser)]
#[command(name = "self-reborn")]
#[command(about = "Session-continuity hooks for restarting agents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// SessionEnd hook: record the ending session (reads $CLAUDE_SESSION_ID)
    SessionEnd,

    /// SessionStart hook: print pending restart context as JSON
    SessionStart,

    /// Leave a restart reason (and optional context) for the next session
    Prepare(command::prepare::PrepareArgs),

    /// Show the hook state of the current project
    Status,

    /// List recorded session ends, oldest first
    History {
        /// Only show the most recent N sessions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Manage the global configuration file
    Config(command::config::ConfigArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SessionEnd => command::session_end::run(),
        Commands::SessionStart => command::session_start::run(),
        Commands::Prepare(args) => command::prepare::run(args),
        Commands::Status => command::status::run(),
        Commands::History { limit } => command::history::run(limit),
        Commands::Config(args) => command::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_hook_subcommands() {
        let cli = Cli::try_parse_from(["self-reborn", "session-end"]).unwrap();
        assert!(matches!(cli.command, Commands::SessionEnd));

        let cli = Cli::try_parse_from(["self-reborn", "session-start"]).unwrap();
        assert!(matches!(cli.command, Commands::SessionStart));
    }

    #[test]
    fn prepare_context_flags_conflict() {
        let result = Cli::try_parse_from([
            "self-reborn",
            "prepare",
            "--reason",
            "r",
            "--context",
            "c",
            "--context-file",
            "f",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_history_limit() {
        let cli = Cli::try_parse_from(["self-reborn", "history", "-n", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: Some(3) }));
    }
}
