//! Virtual memory simulator CLI.
//!
//! Replays a trace file through one replacement policy, printing the
//! resolution of every reference followed by the run report.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

use vmsim::common::{AgingSelection, PolicyKind, SimConfig};
use vmsim::{read_trace, simulate};

#[derive(Parser, Debug)]
#[command(
    name = "vmsim",
    author,
    version,
    about = "Virtual Memory Simulator for Opt, Clock, Aging, and LRU"
)]
struct Cli {
    /// Number of frames
    #[arg(short = 'n', long = "numframes")]
    numframes: usize,

    /// Replacement algorithm: opt, clock, aging or lru
    #[arg(short = 'a', long = "alg")]
    alg: String,

    /// Refresh interval in units of number of references (aging only)
    #[arg(short = 'r', long = "refresh")]
    refresh: Option<u64>,

    /// Name of the tracefile
    tracefile: PathBuf,

    /// Do not print the per-reference resolution lines
    #[arg(short, long)]
    quiet: bool,

    /// Reproduce the original aging victim lookup
    #[arg(long)]
    compat_aging: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("vmsim: {}", e);
        if e.is_configuration() {
            eprintln!("Try 'vmsim --help' for more information.");
            process::exit(2);
        }
        process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // Stdout carries the report, so logs go to stderr.
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("vmsim: logger unavailable: {}", e);
    }
}

fn run(cli: &Cli) -> vmsim::Result<()> {
    let policy: PolicyKind = cli.alg.parse()?;
    let selection = if cli.compat_aging {
        AgingSelection::Compatible
    } else {
        AgingSelection::Strict
    };
    let config = SimConfig::new(cli.numframes, policy, cli.refresh)?.with_aging_selection(selection);

    let records = read_trace(&cli.tracefile)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_err = None;

    let report = simulate(config, &records, |_, event| {
        if cli.quiet || write_err.is_some() {
            return;
        }
        if let Err(e) = writeln!(out, "{}", event.outcome) {
            write_err = Some(e);
        }
    })?;

    if let Some(e) = write_err {
        return Err(e.into());
    }

    writeln!(out, "{}", report)?;
    out.flush()?;
    Ok(())
}
