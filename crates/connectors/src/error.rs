use crate::sql::base::error::DbError;
use engine_config::ConfigError;
use model::Side;
use thiserror::Error;

/// Errors raised while opening a connection for a side.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The side's connection keys are incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Neither the URL scheme nor the driver key names a supported database.
    #[error("Unsupported driver `{driver}` for database {side}")]
    UnsupportedDriver { side: Side, driver: String },

    /// The driver could not establish the connection.
    #[error("Unable to connect to database {side} due error: {source}")]
    Connect {
        side: Side,
        #[source]
        source: DbError,
    },
}

impl ConnectorError {
    pub fn connect(side: Side, source: DbError) -> Self {
        ConnectorError::Connect { side, source }
    }
}
