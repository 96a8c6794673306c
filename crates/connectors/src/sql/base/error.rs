use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// TLS setup failed before the handshake started.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    /// The connection URL could not be parsed by the driver.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// The ping query returned something other than `1`.
    #[error("Ping returned unexpected result: {0}")]
    UnexpectedPing(String),

    /// The counting query did not expose a required column.
    #[error("Column `{0}` not found in query result")]
    MissingColumn(&'static str),

    /// A column value could not be read as the expected type.
    #[error("Cannot read column `{column}`: {message}")]
    Conversion {
        column: &'static str,
        message: String,
    },

    /// A row count did not fit an unsigned 64-bit integer.
    #[error("Row count for table `{table}` is out of range: {value}")]
    CountOutOfRange { table: String, value: String },
}

impl DbError {
    pub fn conversion(column: &'static str, message: impl ToString) -> Self {
        DbError::Conversion {
            column,
            message: message.to_string(),
        }
    }
}
