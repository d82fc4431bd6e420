use std::io::Read;
use std::path::PathBuf;

use eyre::{Context, OptionExt, Result};
use neoncube_core::Timestamp;
use neoncube_core::prelude::*;
use neoncube_prefs::Preferences;

/// Neoncube command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to use instead of the default location.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
    /// Ignore any preferences file and use the built-in defaults.
    #[arg(long, global = true, conflicts_with = "prefs")]
    pub default_prefs: bool,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Apply moves to a solved puzzle and print the result.
    ///
    /// Moves are written as an axis, a layer, and an optional prime for the
    /// negative direction, such as `x1`, `y0'`, or `z-1`.
    Play {
        /// Moves to apply, in order.
        moves: Vec<String>,
    },
    /// Generate a shuffle and print its parameters, moves, and result.
    Scramble {
        /// Number of moves (defaults to the preferences).
        #[arg(short, long)]
        length: Option<u32>,
        /// Random seed.
        #[arg(short, long)]
        seed: Option<String>,
        /// Timestamp to mix into the seed, in RFC 3339 format.
        #[arg(short, long)]
        time: Option<Timestamp>,
    },
    /// Run a scripted session against the animated puzzle on a virtual clock
    /// and print the result.
    Simulate {
        /// Script file, use '-' for stdin.
        #[arg(value_parser)]
        script: clio::Input,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Also write them to the preferences file.
        #[arg(long)]
        save: bool,
    },
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs_path = if args.default_prefs {
        None
    } else {
        args.prefs.clone().or_else(default_prefs_path)
    };
    let prefs = load_prefs(&args)?;

    match args.subcommand {
        Subcommand::Play { moves } => {
            let moves = Move::parse_sequence(&moves.join(" ")).context("error parsing moves")?;
            let mut lattice = Lattice::new_solved();
            lattice
                .apply_moves(moves.iter().copied())
                .context("error applying moves")?;
            print_result(&lattice, &moves);
            Ok(())
        }

        Subcommand::Scramble { length, seed, time } => {
            let mut params = ScrambleParams::new(length.unwrap_or(prefs.shuffle.length));
            if let Some(seed) = seed {
                params.seed = seed;
            }
            if let Some(time) = time {
                params.time = time;
            }
            let scrambled = params.scrambled_lattice();
            print!(
                "{}",
                serde_norway::to_string(&scrambled.params).context("error serializing scramble")?
            );
            print_result(&scrambled.lattice, &scrambled.moves);
            Ok(())
        }

        Subcommand::Simulate { mut script } => {
            let mut buffer = String::new();
            script
                .read_to_string(&mut buffer)
                .context("error reading script")?;
            let commands = crate::script::parse_script(&buffer)?;

            let mut runner = crate::script::ScriptRunner::new(prefs);
            for (line, command) in commands {
                runner
                    .run(&command)
                    .wrap_err_with(|| format!("error on line {line}"))?;
            }

            let summary = runner.summary();
            println!("{}", summary.net);
            println!();
            println!("history: {}", Move::format_sequence(summary.history));
            println!("status: {:?}", summary.status);
            println!("celebrations: {}", summary.celebrations);
            Ok(())
        }

        Subcommand::Prefs { save } => {
            print!(
                "{}",
                serde_norway::to_string(&prefs).context("error serializing preferences")?
            );
            if save {
                let path = prefs_path.ok_or_eyre("no preferences file location")?;
                prefs.save(&path)?;
                log::info!("saved preferences to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Loads preferences according to the command-line arguments.
///
/// An explicitly requested file must load successfully. The file in the
/// default location is optional, and errors in it only produce a warning.
fn load_prefs(args: &Args) -> Result<Preferences> {
    if args.default_prefs {
        return Ok(Preferences::default());
    }
    match &args.prefs {
        Some(path) => Preferences::try_load(Some(path))
            .wrap_err_with(|| format!("error loading preferences from {}", path.display())),
        None => {
            let path = default_prefs_path().filter(|path| path.exists());
            Ok(Preferences::load(path.as_deref()))
        }
    }
}

fn default_prefs_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", crate::TITLE)?;
    Some(dirs.config_dir().join("prefs.yaml"))
}

fn print_result(lattice: &Lattice, moves: &[Move]) {
    println!("{}", lattice.net_string());
    println!();
    println!("moves: {}", Move::format_sequence(moves.iter().copied()));
    println!("status: {:?}", lattice.solve_status());
}
