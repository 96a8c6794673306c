use crate::exit::ExitCode;
use connectors::{ConnectorError, DbError};
use engine_config::ConfigError;
use engine_core::CollectError;
use model::Side;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// Bad or missing arguments; the usage banner follows the message.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connect(ConnectorError),

    #[error("Unable to execute statement on database {side} due error: {source}")]
    Query {
        side: Side,
        #[source]
        source: DbError,
    },

    /// The connectivity check failed; its result line is already printed.
    #[error("Connection test failed for database {0}")]
    ConnectionTest(Side),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<ConnectorError> for CliError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Config(err) => CliError::Config(err),
            other => CliError::Connect(other),
        }
    }
}

impl From<CollectError> for CliError {
    fn from(err: CollectError) -> Self {
        match err {
            CollectError::Config(err) => CliError::Config(err),
            CollectError::Connector(err) => err.into(),
            CollectError::Query { side, source } => CliError::Query { side, source },
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Usage(_) => ExitCode::UsageError,
            _ => ExitCode::GeneralError,
        }
    }

    /// Whether the operator already saw a message for this failure.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::ConnectionTest(_))
    }

    /// The error followed by its cause chain, skipping causes whose text is
    /// already part of the previous line.
    pub fn format_detailed(&self) -> String {
        let mut output = self.to_string();
        let mut previous = output.clone();

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            let text = err.to_string();
            if !previous.contains(&text) {
                if depth == 1 {
                    output.push_str("\nCaused by:");
                }
                output.push_str(&format!("\n  {depth}: {text}"));
                depth += 1;
            }
            previous = text;
            source = err.source();
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_errors_flatten() {
        let err: CliError = CollectError::Config(ConfigError::incomplete(["a", "b"])).into();
        assert!(matches!(err, CliError::Config(ConfigError::Incomplete { .. })));

        let err: CliError =
            CollectError::Connector(ConnectorError::Config(ConfigError::incomplete(["a"]))).into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = CollectError::Connector(ConnectorError::UnsupportedDriver {
            side: Side::Target,
            driver: "db2".into(),
        })
        .into();
        assert!(matches!(err, CliError::Connect(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("x".into()).exit_code().as_i32(), 2);
        assert_eq!(
            CliError::Config(ConfigError::incomplete(["a"]))
                .exit_code()
                .as_i32(),
            1
        );
        assert_eq!(CliError::ConnectionTest(Side::Source).exit_code().as_i32(), 1);
    }

    #[test]
    fn test_detailed_format_skips_repeated_causes() {
        let err = CliError::Query {
            side: Side::Source,
            source: DbError::MissingColumn("table_rows"),
        };
        assert_eq!(
            err.format_detailed(),
            "Unable to execute statement on database source due error: Column `table_rows` not found in query result"
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CliError::Config(ConfigError::Unreadable {
            file_name: "application.properties".into(),
            source: io,
        });
        assert_eq!(
            err.format_detailed(),
            "Error to load application.properties file due error : denied"
        );
    }
}
