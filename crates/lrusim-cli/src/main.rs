//! LruSim - LRU cache simulator driver

mod demo;
mod interactive;
mod parser;
mod render;
mod replay;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};

use crate::interactive::Session;

/// Capacity used when none is given on the command line
const DEFAULT_CAPACITY: usize = 4;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of blocks)
    #[arg(short, long, global = true)]
    capacity: Option<usize>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scripted demonstration (default)
    Demo,

    /// Menu-driven session on stdin/stdout
    Interactive,

    /// Replay a trace file of `<address> [data]` lines
    Replay {
        /// Trace file path
        trace: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    debug!(?args, "starting lrusim v{}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            render::banner(&mut out)?;
            demo::run(&mut out, args.capacity.unwrap_or(DEFAULT_CAPACITY))?;
        }
        Command::Interactive => {
            render::banner(&mut out)?;
            let stdin = io::stdin();
            Session::new(stdin.lock(), &mut out).run(args.capacity)?;
        }
        Command::Replay { trace, json } => {
            replay::run_file(
                &mut out,
                &trace,
                args.capacity.unwrap_or(DEFAULT_CAPACITY),
                json,
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
