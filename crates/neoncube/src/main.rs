//! Headless front end for the Neoncube 3x3x3 twisty puzzle.

mod cli;
mod script;

/// Name of the program, used for the preferences directory.
const TITLE: &str = "Neoncube";

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;

    cli::exec(args)
}
