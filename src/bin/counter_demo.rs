use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use log::debug;

use pitfall_demos::cli::{self, Cli};
use pitfall_demos::{ConcurrentCounter, Result};

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_logging(args.log_level());
    debug!("{args:?}");

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn execute(args: &Cli) -> Result<()> {
    let counter = ConcurrentCounter::new(args.mode, args.iterations)?;
    let report = counter.run();

    println!("{}", cli::render(&report, args.format)?);
    if args.report {
        eprintln!("{}", cli::summary(&report));
    }
    Ok(())
}
