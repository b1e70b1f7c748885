//! Drives the SAG4Fun network: demo, randomized regression, Verilog functions and fixed test vectors.

#![deny(rust_2018_idioms)]
#![deny(trivial_numeric_casts)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sag4fun::{Config, ReshapeStrategy};
use static_assertions::const_assert_eq;
use tracing_subscriber::EnvFilter;

mod checks;
mod demo;
mod error;
mod regress;
mod snippets;

use error::GenError;

/// Symbol ramp used by the regression and the checks, in ascending code point order.
pub(crate) const SYMBOLS: &str = "+0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz~";
const_assert_eq!(SYMBOLS.len(), 64);

pub(crate) const SEPARATOR: &str = "==================================================";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReshapeArg {
    RowLocal,
    Flatten,
}

impl From<ReshapeArg> for ReshapeStrategy {
    fn from(arg: ReshapeArg) -> Self {
        match arg {
            ReshapeArg::RowLocal => Self::RowLocal,
            ReshapeArg::Flatten => Self::FlattenBased,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Drives the SAG4Fun butterfly network", long_about = None)]
struct Args {
    /// Logs every network stage.
    #[arg(long, global = true)]
    trace: bool,

    /// Reshape strategy of the network.
    #[arg(long, global = true, value_enum, default_value_t = ReshapeArg::Flatten)]
    reshape: ReshapeArg,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Gathers and scatters letters and digits on two fixed masks.
    Demo,

    /// Checks random masks for sorted gathers and exact round trips.
    Regress {
        #[arg(long, default_value_t = 32)]
        width: usize,

        #[arg(long, default_value_t = 100)]
        rounds: usize,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Emits the Verilog `split` and `merge` functions.
    Snippets {
        #[arg(long, default_value = "./build")]
        out: PathBuf,
    },

    /// Prints reshape chains and the fixed test vectors.
    Checks {
        #[arg(long, default_value_t = 32)]
        width: usize,
    },
}

fn init_tracing(trace: bool) {
    let default = if trace { "info,sag4fun::trace=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<(), GenError> {
    let args = Args::parse();
    init_tracing(args.trace);

    let config = Config::default().with_debug_trace(args.trace).with_reshape(args.reshape.into());

    match args.command {
        Some(Command::Demo) => demo::run(config),
        Some(Command::Regress { width, rounds, seed }) => regress::run(width, rounds, seed, config),
        Some(Command::Snippets { out }) => snippets::run(out),
        Some(Command::Checks { width }) => checks::run(width, config),
        None => {
            demo::run(config)?;
            regress::run(32, 100, None, config)?;
            regress::run(64, 100, None, config)?;
            snippets::run("./build")?;
            checks::run(32, config)?;
            checks::run(64, config)?;
            println!("ALL TESTS PASSED");
            println!();
            Ok(())
        }
    }
}
