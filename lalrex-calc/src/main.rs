//! Command-line interface (CLI) for lalrex-calc
//!
//! This binary wraps the [`CalcParser`] and exposes a simple command-line
//! interface for parsing and evaluating calculator expressions read from a
//! file. Set `RUST_LOG=trace` to watch the scanner and the automaton work.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use lalrex_calc::{CalcParser, evaluate};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses an expression and prints its syntax tree
    Parse {
        /// Input file with a calculator expression
        #[arg(short, long)]
        input: PathBuf,

        /// Collapse unit reductions in the tree
        #[arg(long)]
        trim: bool,

        /// Recover from syntax errors through the `error` terminal
        #[arg(long)]
        recover: bool,
    },
    /// Evaluates an expression and prints its value
    Eval {
        /// Input file with a calculator expression
        #[arg(short, long)]
        input: PathBuf,

        /// Recover from syntax errors through the `error` terminal
        #[arg(long)]
        recover: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let calc = CalcParser::try_new().context("can't load calculator grammar")?;

    match args.command {
        Commands::Parse {
            input,
            trim,
            recover,
        } => {
            let tree = calc
                .parse_file(&input, trim, recover)
                .with_context(|| format!("can't parse {:?}", input))?;
            print!("{}", tree.display());
        }
        Commands::Eval { input, recover } => {
            let tree = calc
                .parse_file(&input, true, recover)
                .with_context(|| format!("can't parse {:?}", input))?;
            let value = evaluate(&tree)?;
            println!("{}", value);
        }
    }
    Ok(())
}
