use crate::{
    commands::{Invocation, program_name, usage},
    error::CliError,
    exit::ExitCode,
};
use engine_config::Properties;
use engine_core::{RowCountCollector, compare};
use model::Side;
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod error;
mod exit;

/// Log level used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let program = program_name(args.first().map(String::as_str));

    match run(args).await {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            report_error(&err, &program);
            err.exit_code().into()
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(args: Vec<String>) -> Result<(), CliError> {
    match commands::parse(args)? {
        Invocation::Info(output) => {
            output.print()?;
        }
        Invocation::Compare => {
            let properties = Properties::load()?;
            let collector = RowCountCollector::new(&properties);
            collector.preflight(&Side::ALL)?;

            let report = compare(&collector).await?;
            report.write_to(&mut io::stdout().lock())?;
            if report.is_empty() {
                warn!("Source query returned no tables, nothing was compared");
            }
            info!(
                all_match = report.all_match(),
                "Comparison finished: {} of {} tables match",
                report.successes().len(),
                report.len()
            );
        }
        Invocation::Test(side) => {
            let properties = Properties::load()?;
            conn::test_connection(&properties, side, &mut io::stdout().lock()).await?;
        }
    }

    Ok(())
}

fn report_error(err: &CliError, program: &str) {
    if err.is_reported() {
        return;
    }

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", err.format_detailed());
    if let CliError::Usage(_) = err {
        let _ = writeln!(stdout, "{}", usage(program));
    }
}
