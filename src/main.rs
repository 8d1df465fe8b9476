//! Tmpsweep CLI entry point.
//!
//! Parses arguments, initializes logging, loads the configuration, runs one
//! cleanup pass, and prints the summary table and elapsed time. A completed
//! pass exits 0 even when individual entries failed; non-zero exit codes are
//! reserved for configuration and PID file problems.

use std::process::ExitCode;
use tmpsweep::cleaner::Cleaner;
use tmpsweep::cli::Cli;
use tmpsweep::config::Config;
use tmpsweep::error::Result;
use tmpsweep::exit_codes;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let mut cleaner = Cleaner::new(config, cli.dry_run)?;
    cleaner.run()?;

    print!("{}", cleaner.summary());
    println!("elapsed: {:.2?}", cleaner.elapsed());
    Ok(())
}

/// Set up the tracing subscriber. `RUST_LOG` overrides the flag-derived
/// level when present.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
