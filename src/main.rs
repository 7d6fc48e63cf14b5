/// Main entry point for the weight tracker CLI
///
/// This file sets up logging, parses command line arguments and dispatches
/// to the command handlers. Results go to stdout, logs and errors to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use tracing::info;

use weight_tracker::commands::{self, AddParams, ListParams, StatsParams, UpdateParams};
use weight_tracker::display;
use weight_tracker::{AppConfig, AppError, ChartArtifact, SqliteStore, WeightTracker};

/// Command line arguments for the weight tracker
#[derive(Parser, Debug)]
#[command(name = "weight-tracker", author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, DATABASE_PATH or a default location in the user's home directory is used
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new weight measurement
    Add {
        /// Weight value, greater than 0
        weight: f64,

        /// Date of the measurement (format set by DATE_INPUT_FORMAT), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Unit (kg, lbs), defaults to DEFAULT_UNIT
        #[arg(short, long)]
        unit: Option<String>,

        /// Free text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List weight entries
    List(ListArgs),

    /// Update a weight entry by ID; only the given fields change
    Update {
        #[arg(allow_hyphen_values = true)]
        id: i64,

        /// New weight value
        #[arg(short, long)]
        weight: Option<f64>,

        /// New date
        #[arg(short, long)]
        date: Option<String>,

        /// New unit (kg, lbs)
        #[arg(short, long)]
        unit: Option<String>,

        /// New note
        #[arg(short, long)]
        note: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a weight entry by ID
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        confirm: bool,

        /// Force delete without confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show summary statistics
    Stats {
        /// Show details of the referenced entries
        #[arg(short, long)]
        verbose: bool,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Delete all weight entries and users
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Start date for filtering (format set by DATE_INPUT_FORMAT)
    #[arg(short, long)]
    from: Option<String>,

    /// End date for filtering
    #[arg(short, long)]
    to: Option<String>,

    /// Maximum number of entries to list (0 = no limit)
    #[arg(short, long, default_value_t = 0)]
    limit: usize,

    /// Field to sort by (date, weight)
    #[arg(short, long, default_value = "date")]
    sort: String,

    /// Sort in descending order
    #[arg(
        short = 'd',
        long = "desc",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    desc: bool,

    /// Sort in ascending order (same as --desc=false)
    #[arg(long, conflicts_with = "desc")]
    asc: bool,

    /// Filter by unit (kg, lbs)
    #[arg(short, long)]
    unit: Option<String>,

    /// Display weight chart
    #[arg(short, long)]
    graph: bool,

    /// Graph output type (terminal, html, png)
    #[arg(short, long, default_value = "terminal")]
    output: String,

    /// Output filename for the graph (saved in charts/)
    #[arg(long)]
    file: Option<String>,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user and log in as them
    Register { username: String },
    /// Switch to an existing user
    Login { username: String },
    /// List all users
    List,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("weight_tracker={}", log_level))
        .with_writer(io::stderr) // Keep stdout for command output
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = AppConfig::from_env();
    let tracker = WeightTracker::open(config, args.database)?;

    match args.command {
        Command::Add {
            weight,
            date,
            unit,
            note,
        } => {
            let params = AddParams {
                weight,
                date,
                unit,
                note,
                owner: tracker.owner(),
            };
            let response = commands::add_entry(tracker.store(), tracker.config(), params)?;
            println!("{}", response.message);
        }

        Command::List(list) => run_list(&tracker, list)?,

        Command::Update {
            id,
            weight,
            date,
            unit,
            note,
            yes,
        } => {
            let params = UpdateParams {
                id,
                weight,
                date,
                unit,
                note,
            };
            let preview = commands::prepare_update(tracker.store(), tracker.config(), params)?;

            println!("Current weight entry:");
            println!("{}", display::format_entry(&preview.current, tracker.config()));
            println!("Updated weight entry:");
            println!("{}", display::format_entry(&preview.updated, tracker.config()));

            if !yes && !confirm("Are you sure you want to update this entry?")? {
                println!("Update cancelled.");
            } else {
                let saved = commands::apply_update(tracker.store(), &preview)?;
                println!("Successfully updated weight entry with ID {}.", saved.id);
            }
        }

        Command::Delete { id, confirm: yes, force } => {
            let entry = commands::find_entry(tracker.store(), id)?;
            println!("Found weight entry to delete:");
            println!("{}", display::format_entry(&entry, tracker.config()));

            if !yes && !force && !confirm("Are you sure you want to delete this entry?")? {
                println!("Deletion cancelled.");
            } else {
                let response = commands::delete_entry(tracker.store(), id)?;
                println!("{}", response.message);
            }
        }

        Command::Stats { verbose } => {
            let stats = commands::compute_stats(
                tracker.store(),
                StatsParams {
                    owner: tracker.owner(),
                },
            )?;
            print!("{}", display::format_statistics(&stats, tracker.config(), verbose));
        }

        Command::User { action } => match action {
            UserCommand::Register { username } => {
                let user = commands::register_user(tracker.store(), tracker.session_path(), &username)?;
                println!("User was created successfully");
                print!("{}", display::format_user(&user));
            }
            UserCommand::Login { username } => {
                let user = commands::login_user(tracker.store(), tracker.session_path(), &username)?;
                println!("Switched to user {}", user.username);
            }
            UserCommand::List => {
                let users = commands::list_registered_users(tracker.store(), tracker.session_path())?;
                print!("{}", display::format_user_list(&users));
            }
        },

        Command::Reset { force } => {
            if !force && !confirm("This deletes all weight entries and users. Continue?")? {
                println!("Reset cancelled.");
            } else {
                commands::reset_database(tracker.store(), tracker.session_path())?;
                println!("Database reset completed successfully.");
            }
        }
    }

    tracker.close()?;
    info!("Done");
    Ok(())
}

fn run_list(tracker: &WeightTracker<SqliteStore>, list: ListArgs) -> Result<(), AppError> {
    let params = ListParams {
        from: list.from,
        to: list.to,
        limit: list.limit,
        sort: list.sort,
        descending: list.desc && !list.asc,
        unit: list.unit,
        owner: tracker.owner(),
        graph: list.graph,
        output: list.output,
        file: list.file,
        chart_dir: None,
    };

    let response = commands::list_entries(tracker.store(), tracker.config(), params)?;

    match response.chart {
        Some(ChartArtifact::Terminal(text)) => print!("{}", text),
        Some(ChartArtifact::File(path)) => {
            println!("Chart generated successfully: {}", path.display());
            println!("Open {} in your browser to view the chart.", path.display());
        }
        None => print!("{}", display::format_entries(&response.entries, tracker.config())),
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but an explicit yes is no
fn confirm(question: &str) -> Result<bool, AppError> {
    print!("{} (y/N): ", question);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    Ok(matches!(response.trim(), "y" | "Y" | "yes" | "Yes"))
}
