pub mod config;
pub mod text;
pub mod view;

use std::io::IsTerminal;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::settings::{load_settings, Settings};
use crate::source::Source;
use crate::view_model::AppState;

#[derive(Parser)]
#[command(
    name = "planboard",
    about = "Plan vs. fact board for managers over a rolling six-month window."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board (falls back to `show` when not on a terminal).
    View(BoardArgs),
    /// Print the board once as a plain table.
    Show(BoardArgs),
    /// Show or update settings.
    Config {
        /// Data endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
        /// Request timeout in seconds (0 = no timeout)
        #[arg(long)]
        timeout: Option<u64>,
        /// Year preselected in the year selector
        #[arg(long = "default-year")]
        default_year: Option<i32>,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct BoardArgs {
    /// Data source: http(s) URL or path to a JSON file (default: configured endpoint)
    #[arg(long)]
    pub source: Option<String>,
    /// First visible month, 0 = January .. 11 = December
    #[arg(long, default_value = "0")]
    pub start: usize,
    /// Selected year (default: configured default year)
    #[arg(long)]
    pub year: Option<i32>,
    /// Only show managers whose records belong to the selected year
    #[arg(long = "filter-year")]
    pub filter_year: bool,
}

impl BoardArgs {
    pub(crate) fn source(&self, settings: &Settings) -> Source {
        Source::parse(self.source.as_deref().unwrap_or(&settings.endpoint))
    }

    pub(crate) fn initial_state(&self, settings: &Settings) -> AppState {
        AppState::new(
            self.year.unwrap_or(settings.default_year),
            self.start,
            self.filter_year,
        )
    }
}

/// Whether `view` will actually take over the terminal.
pub fn wants_terminal(command: &Option<Commands>) -> bool {
    matches!(command, None | Some(Commands::View(_))) && std::io::stdout().is_terminal()
}

pub fn dispatch(command: Option<Commands>) -> Result<()> {
    match command {
        None => dispatch_board(BoardArgs::default()),
        Some(Commands::View(args)) => dispatch_board(args),
        Some(Commands::Show(args)) => text::run(&args, &load_settings()),
        Some(Commands::Config {
            endpoint,
            timeout,
            default_year,
        }) => config::run(endpoint, timeout, default_year),
    }
}

fn dispatch_board(args: BoardArgs) -> Result<()> {
    let settings = load_settings();
    if std::io::stdout().is_terminal() {
        view::run(&args, &settings)
    } else {
        // Non-TTY: plain table to stdout
        text::run(&args, &settings)
    }
}
