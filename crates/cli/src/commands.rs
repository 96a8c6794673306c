use crate::error::CliError;
use clap::{
    Parser, Subcommand,
    error::{ContextKind, ContextValue, ErrorKind},
};
use model::Side;
use std::{ffi::OsString, path::Path};

/// Fallback for the usage banner when argv[0] is unavailable.
const DEFAULT_PROGRAM: &str = "rowmatch";

#[derive(Parser, Debug)]
#[command(
    name = "rowmatch",
    version,
    about = "Compare per-table row counts between a source and a target database",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare row counts of every source table with the target
    Compare,
    /// Check that a database accepts connections
    Test {
        /// Database to test: "source" or "target"
        #[arg(value_name = "source|target")]
        database: Option<String>,
    },
}

/// What the dispatcher decided to run.
#[derive(Debug)]
pub enum Invocation {
    Compare,
    Test(Side),
    /// Help or version output requested; printed as-is.
    Info(clap::Error),
}

pub fn parse<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(Invocation::Info(err)),
                _ => Err(CliError::Usage(invalid_argument_message(&err))),
            };
        }
    };

    match cli.command {
        None => Err(CliError::Usage("Error due argument is missing".to_string())),
        Some(Commands::Compare) => Ok(Invocation::Compare),
        Some(Commands::Test { database: None }) => Err(CliError::Usage(
            "Error due missing database name.".to_string(),
        )),
        Some(Commands::Test {
            database: Some(name),
        }) => name
            .parse::<Side>()
            .map(Invocation::Test)
            .map_err(|_| CliError::Usage(format!("Invalid Database name {name}."))),
    }
}

fn invalid_argument_message(err: &clap::Error) -> String {
    let offending = err
        .get(ContextKind::InvalidSubcommand)
        .or_else(|| err.get(ContextKind::InvalidArg));
    match offending {
        Some(ContextValue::String(arg)) => format!("Invalid argument {arg}."),
        _ => "Invalid arguments.".to_string(),
    }
}

/// Executable file name used in the usage banner.
pub fn program_name(argv0: Option<&str>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

pub fn usage(program: &str) -> String {
    format!("Usage:\n{program} compare\n{program} test [source|target]")
}
