use connectors::{ConnectorError, DbError};
use engine_config::ConfigError;
use model::Side;
use thiserror::Error;

/// Errors raised while collecting row counts for a side.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// The counting query failed to prepare, execute or iterate.
    #[error("Unable to execute statement on database {side} due error: {source}")]
    Query {
        side: Side,
        #[source]
        source: DbError,
    },
}
