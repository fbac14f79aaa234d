//! classprep CLI - Java class-file fixture preparation
//!
//! Usage: classprep [--expected-javac <VERSION>] [--out-dir <DIR>]
//!                  [--config <FILE>] [--java-home <DIR>] [-v...]

mod cli;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;

use classprep::{FixtureError, Pipeline, Toolchain};
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("[ERROR] {}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.into_settings();
    let report = Pipeline::new(settings, Toolchain::from_env()).run()?;

    if !report.extracted.is_clean() {
        tracing::warn!(
            "{} extraction issue(s); see errors above",
            report.extracted.issues.len()
        );
    }
    report.print_summary();
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<FixtureError>()
        .map(FixtureError::exit_code)
        .unwrap_or(2)
}

/// Diagnostics go to stderr; stdout is reserved for progress output.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
