use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use log::LevelFilter;

use crate::counter::{Mode, RunReport, DEFAULT_ITERATIONS};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Increment one shared counter from two threads, with or without a lock.
#[derive(Debug, Parser)]
#[command(name = "counter-demo", version, about)]
pub struct Cli {
    /// Synchronization applied to each increment
    #[arg(long, value_enum, env = "COUNTER_DEMO_MODE", default_value = "guarded")]
    pub mode: Mode,

    /// Increments performed by each of the two workers
    #[arg(
        long,
        env = "COUNTER_DEMO_ITERATIONS",
        default_value_t = DEFAULT_ITERATIONS,
        allow_negative_numbers = true
    )]
    pub iterations: i64,

    /// How the result is written to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print a run summary to stderr
    #[arg(long)]
    pub report: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the verbosity flags.
pub fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp_millis();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}

/// The stdout line for a finished run.
pub fn render(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.final_value.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
    }
}

/// Human-readable summary for stderr.
pub fn summary(report: &RunReport) -> String {
    let verdict = if report.is_exact() {
        "exact".green().bold()
    } else {
        "lost updates".red().bold()
    };

    let mut lines = vec![
        format!("{} {}", "mode:".bold(), report.mode),
        format!(
            "{} {} x {} iterations",
            "workers:".bold(),
            report.workers.len(),
            report.iterations
        ),
        format!("{} {}", "expected:".bold(), report.expected),
        format!("{} {} ({})", "final:".bold(), report.final_value, verdict),
    ];
    if report.mode == Mode::Unguarded {
        lines.push(format!(
            "{} {} (non-deterministic, bounded by {}..={})",
            "lost:".bold(),
            report.lost_updates,
            report.lower_bound(),
            report.expected
        ));
    }
    lines.push(format!(
        "{} {:.3} ms",
        "elapsed:".bold(),
        report.elapsed.as_secs_f64() * 1000.0
    ));

    lines.join("\n")
}
