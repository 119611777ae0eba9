mod calc;
mod cmd;
mod data;
mod error;
mod logging;
mod ui;

use calc::Granularity;
use clap::{Parser, Subcommand};
use cmd::calendar::CalendarArgs;
use data::CampaignStatus;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promo", about = "promotional campaign calendar")]
struct Cli {
    /// Path to the data directory containing config and campaign files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config and sample campaign files
    Init,
    /// Print the calendar window around a date
    Calendar {
        /// Granularity of the window (defaults to the configured view)
        #[arg(long, value_enum)]
        view: Option<Granularity>,
        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Only show this weekday of the month, 0 = Sunday .. 6 = Saturday
        #[arg(long)]
        weekday: Option<u8>,
        /// Only show campaigns with these statuses (comma separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        status: Vec<CampaignStatus>,
        /// Emit the window as JSON
        #[arg(long)]
        json: bool,
    },
    /// List campaigns ordered by start date
    Campaigns {
        /// Only show campaigns with these statuses (comma separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        status: Vec<CampaignStatus>,
    },
    /// Count campaigns by status
    Summary {
        /// Count as of this date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O is independent of the
    // working directory.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    match &cli.command {
        None => {
            if cli.verbose > 0 || std::env::var_os("RUST_LOG").is_some() {
                logging::init_file(cli.verbose, &data_dir)?;
            }
        }
        Some(_) => logging::init_stderr(cli.verbose)?,
    }
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Calendar {
            view,
            date,
            weekday,
            status,
            json,
        }) => cmd::calendar::run(&CalendarArgs {
            view,
            date,
            weekday,
            status,
            json,
        }),
        Some(Commands::Campaigns { status }) => cmd::campaigns::run(&status),
        Some(Commands::Summary { date }) => cmd::summary::run(date.as_deref()),
    }
}
