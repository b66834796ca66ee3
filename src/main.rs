mod cell;
mod cli;
mod error;
mod fmt;
mod logging;
mod models;
mod normalizer;
mod settings;
mod source;
mod tui;
mod view_model;
mod window;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if cli::wants_terminal(&cli.command) {
        let path = settings::load_settings().log_path();
        if let Err(e) = logging::init_file(&path) {
            eprintln!("Logging disabled ({}): {e}", path.display());
        }
    } else {
        logging::init_stderr();
    }

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
