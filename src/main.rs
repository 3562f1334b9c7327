mod commands;
mod dates;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use keepintouch_core::KeepInTouch;
use tracing_subscriber::EnvFilter;

/// Log filter directive, e.g. `KEEPINTOUCH_LOG=debug`.
const LOG_ENV_VAR: &str = "KEEPINTOUCH_LOG";

#[derive(Parser)]
#[command(name = "keepintouch")]
#[command(about = "Keep track of when you last caught up with the people you care about")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tracked contacts, least recently caught up first (default)
    List,
    /// Start tracking someone from your address book
    Add {
        /// Address book identifier (vCard UID); omit to pick interactively
        identifier: Option<String>,
    },
    /// Show a contact's details and call targets
    Show {
        /// Identifier or part of the name
        contact: String,
    },
    /// Edit last contacted date and time zone (interactive without flags)
    Edit {
        /// Identifier or part of the name
        contact: String,

        /// When you last caught up (e.g. "2025-03-20", "yesterday")
        #[arg(long, conflicts_with = "clear")]
        date: Option<String>,

        /// Reset last contacted to "Never"
        #[arg(long)]
        clear: bool,

        /// Time zone city or id ("London", "Europe/London", "None")
        #[arg(long)]
        tz: Option<String>,
    },
    /// Mark that you caught up with someone today
    CaughtUp {
        /// Identifier or part of the name
        contact: String,
    },
    /// Stop tracking a contact
    Delete {
        /// Identifier or part of the name
        contact: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Call a contact, then record whether you caught up
    Call {
        /// Identifier or part of the name
        contact: String,

        /// Start a video call instead of a voice call
        #[arg(long)]
        video: bool,

        /// Which number/address to use (1-based), skipping the prompt
        #[arg(short, long)]
        target: Option<usize>,
    },
    /// Search time zones by city
    Tz {
        query: Option<String>,
    },
    /// Show where keepintouch keeps its files
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let app = KeepInTouch::load()?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => commands::list::run(&app),
        Commands::Add { identifier } => commands::add::run(&app, identifier),
        Commands::Show { contact } => commands::show::run(&app, &contact),
        Commands::Edit {
            contact,
            date,
            clear,
            tz,
        } => commands::edit::run(&app, &contact, date, clear, tz),
        Commands::CaughtUp { contact } => commands::caught_up::run(&app, &contact),
        Commands::Delete { contact, yes } => commands::delete::run(&app, &contact, yes),
        Commands::Call {
            contact,
            video,
            target,
        } => commands::call::run(&app, &contact, video, target),
        Commands::Tz { query } => commands::tz::run(query.as_deref()),
        Commands::Config => commands::config::run(&app),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_list() {
        let cli = Cli::try_parse_from(["keepintouch"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn date_and_clear_conflict() {
        let result =
            Cli::try_parse_from(["keepintouch", "edit", "ada", "--date", "today", "--clear"]);
        assert!(result.is_err());
    }

    #[test]
    fn call_flags_parse() {
        let cli =
            Cli::try_parse_from(["keepintouch", "call", "ada", "--video", "-t", "2"]).unwrap();
        match cli.command {
            Some(Commands::Call {
                contact,
                video,
                target,
            }) => {
                assert_eq!(contact, "ada");
                assert!(video);
                assert_eq!(target, Some(2));
            }
            _ => panic!("expected call"),
        }
    }
}
