mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use caldesk_core::config::CaldeskConfig;
use caldesk_core::month::{Month, parse_date};
use caldesk_core::queue::Queue;
use caldesk_core::store::Store;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use log::debug;

#[derive(Parser)]
#[command(name = "caldesk")]
#[command(about = "A monthly calendar, per-date appointments and two todo queues in one local file")]
struct Cli {
    /// Use this data file instead of the configured one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show this month's calendar and both todo queues (default)
    Show,
    /// Show a month's calendar and the appointments of a selected date
    Cal {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,

        /// Go forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,

        /// Go back this many months
        #[arg(long, default_value_t = 0)]
        prev: u32,

        /// Select a date (YYYY-MM-DD) and list its appointments
        #[arg(short, long, value_parser = parse_date)]
        select: Option<NaiveDate>,
    },
    /// Add, remove or list appointments
    Appt {
        #[command(subcommand)]
        action: ApptCommand,
    },
    /// Add, remove, complete or move todo tasks
    Todo {
        #[command(subcommand)]
        action: TodoCommand,
    },
    /// Show config and data file paths
    Config,
}

#[derive(Subcommand)]
enum ApptCommand {
    /// Add an appointment to a date
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Appointment details
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove an appointment by its number in `appt list`
    Rm {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        number: usize,
    },
    /// List a date's appointments
    List {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// Add a task to "today" or "later"
    Add {
        queue: Queue,

        /// Task description
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove a task by its number in `todo list`
    Rm { queue: Queue, number: usize },
    /// Mark one of today's tasks as done
    Done {
        number: usize,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Move a task from "later" to the end of "today"
    Move { number: usize },
    /// List both queues
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let config = CaldeskConfig::load().context("Could not load caldesk config")?;
    let mut options = config.store_options();
    if let Some(file) = cli.file {
        options.path = file;
    }
    debug!("Using data file {}", options.path.display());

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Config => commands::config::run(&options),
        Commands::Show => commands::show::run(&Store::open(options)),
        Commands::Cal {
            month,
            next,
            prev,
            select,
        } => commands::cal::run(&Store::open(options), month, next, prev, select),
        Commands::Appt { action } => {
            let mut store = Store::open(options);
            match action {
                ApptCommand::Add { date, text } => commands::appt::add(&mut store, date, &text),
                ApptCommand::Rm { date, number } => {
                    commands::appt::remove(&mut store, date, number)
                }
                ApptCommand::List { date } => commands::appt::list(&store, date),
            }
        }
        Commands::Todo { action } => {
            let mut store = Store::open(options);
            match action {
                TodoCommand::Add { queue, text } => commands::todo::add(&mut store, queue, &text),
                TodoCommand::Rm { queue, number } => {
                    commands::todo::remove(&mut store, queue, number)
                }
                TodoCommand::Done { number, yes } => commands::todo::done(&mut store, number, yes),
                TodoCommand::Move { number } => commands::todo::move_to_today(&mut store, number),
                TodoCommand::List => commands::todo::list(&store),
            }
        }
    }
}

/// Log to stderr. `RUST_LOG` picks the level unless `--verbose` is given.
fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let logger = if verbose {
        Logger::try_with_str("debug")
    } else {
        Logger::try_with_env_or_str("warn")
    }
    .context("Invalid log specification")?;

    logger
        .log_to_stderr()
        .start()
        .context("Could not start logger")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_appt_add_joins_words() {
        let cli = Cli::parse_from(["caldesk", "appt", "add", "2026-03-20", "Dentist", "at", "3"]);
        match cli.command {
            Some(Commands::Appt {
                action: ApptCommand::Add { date, text },
            }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
                assert_eq!(text, ["Dentist", "at", "3"]);
            }
            _ => panic!("Expected appt add"),
        }
    }

    #[test]
    fn test_todo_queue_and_global_flags_parse() {
        let cli = Cli::parse_from(["caldesk", "todo", "rm", "later", "2", "--file", "/tmp/x.json"]);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.json")));
        assert!(matches!(
            cli.command,
            Some(Commands::Todo {
                action: TodoCommand::Rm {
                    queue: Queue::Later,
                    number: 2
                }
            })
        ));
    }

    #[test]
    fn test_bad_date_and_queue_are_rejected() {
        assert!(Cli::try_parse_from(["caldesk", "appt", "list", "2026-02-30"]).is_err());
        assert!(Cli::try_parse_from(["caldesk", "todo", "add", "someday", "x"]).is_err());
        assert!(Cli::try_parse_from(["caldesk", "cal", "--month", "2026-13"]).is_err());
    }

    #[test]
    fn test_no_subcommand_defaults_to_show() {
        let cli = Cli::parse_from(["caldesk"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::parse_from(["caldesk", "config", "--file", "/tmp/x.json"]);
        assert!(matches!(cli.command, Some(Commands::Config)));
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.json")));
    }
}
