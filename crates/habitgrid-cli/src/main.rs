//! habitgrid CLI - Habit Progress Grid
//!
//! Command-line interface for tracking recurring habits against a sliding
//! 10-day window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use habitgrid_core::{GridController, GridSession, RecordStore};
use habitgrid_store::JsonStore;

mod render;

#[derive(Parser)]
#[command(name = "habitgrid")]
#[command(author, version, about = "Habit progress grid", long_about = None)]
struct Cli {
    /// Store file
    #[arg(
        long,
        value_name = "FILE",
        env = "HABITGRID_FILE",
        default_value = "habits.json"
    )]
    file: PathBuf,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the progress grid (the default)
    Show {
        /// Shift the window this many pages into the past (one page = 10 days)
        #[arg(long, default_value_t = 0)]
        back: u32,
    },

    /// Toggle a task's cell for a date
    ///
    /// An untracked cell is first created unchecked; toggling it again marks
    /// it complete.
    Toggle {
        /// Task name (exact, case-sensitive)
        task: String,
        /// Date in YYYY-MM-DD form
        date: NaiveDate,
    },

    /// Add a new task, tracked from today
    Add {
        /// Task name
        name: String,
    },

    /// Set the date statistics start from
    StartDate {
        /// Date in YYYY-MM-DD form; must fall within the current window
        date: NaiveDate,
    },

    /// List raw completion records with their ids
    Records,

    /// Delete a record by id
    Remove {
        /// Record id as shown by `records`
        id: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let store = JsonStore::open(&cli.file)
        .with_context(|| format!("opening store file {}", cli.file.display()))?;
    let mut controller = GridController::new(store);
    let mut session = GridSession::new();
    controller.refresh(&mut session)?;

    match cli.command.unwrap_or(Commands::Show { back: 0 }) {
        Commands::Show { back } => {
            for _ in 0..back {
                session.shift_back();
            }
            print!("{}", render::render_grid(&controller.view(&session)));
        }
        Commands::Toggle { task, date } => {
            controller.toggle(&mut session, &task, date)?;
            print!("{}", render::render_grid(&controller.view(&session)));
        }
        Commands::Add { name } => {
            session.pending_input = name;
            controller.add_task(&mut session)?;
            print!("{}", render::render_grid(&controller.view(&session)));
        }
        Commands::StartDate { date } => {
            controller.set_start_date(&mut session, date)?;
            print!("{}", render::render_grid(&controller.view(&session)));
        }
        Commands::Records => {
            for record in &session.snapshot.records {
                println!(
                    "{}  {}  {}  {}",
                    record.id,
                    record.date,
                    if record.completed { "done" } else { "open" },
                    record.task
                );
            }
        }
        Commands::Remove { id } => {
            controller
                .store_mut()
                .delete_record(&id)
                .with_context(|| format!("removing record {id}"))?;
            controller.refresh(&mut session)?;
            println!("Removed record {id}");
        }
    }

    Ok(())
}
