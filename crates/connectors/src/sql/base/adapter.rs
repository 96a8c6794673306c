use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::TableCount;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
}

const JDBC_PREFIX: &str = "jdbc:";

impl DatabaseKind {
    /// Picks the driver from the URL scheme, falling back to the configured
    /// driver identifier when the scheme does not name a supported database.
    pub fn resolve(url: &str, driver: &str) -> Option<Self> {
        Self::from_url(url).or_else(|| Self::from_driver(driver))
    }

    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = strip_jdbc(url).split_once("://")?;
        match scheme.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(DatabaseKind::Postgres),
            "mysql" | "mariadb" => Some(DatabaseKind::MySql),
            _ => None,
        }
    }

    /// Accepts short names (`pg`, `mysql`) as well as JDBC driver classes
    /// (`org.postgresql.Driver`, `com.mysql.cj.jdbc.Driver`).
    pub fn from_driver(driver: &str) -> Option<Self> {
        let driver = driver.trim().to_ascii_lowercase();
        if driver == "pg" || driver.contains("postgres") {
            Some(DatabaseKind::Postgres)
        } else if driver.contains("mysql") || driver.contains("mariadb") {
            Some(DatabaseKind::MySql)
        } else {
            None
        }
    }

    /// Rewrites a configured URL into the form the native driver parses.
    pub fn normalize_url(&self, url: &str) -> String {
        let url = strip_jdbc(url.trim());
        match self {
            DatabaseKind::MySql => match url.split_once("://") {
                Some((scheme, rest)) if scheme.eq_ignore_ascii_case("mariadb") => {
                    format!("mysql://{rest}")
                }
                _ => url.to_string(),
            },
            DatabaseKind::Postgres => url.to_string(),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::MySql => f.write_str("MySQL"),
            DatabaseKind::Postgres => f.write_str("PostgreSQL"),
        }
    }
}

fn strip_jdbc(url: &str) -> &str {
    match url.get(..JDBC_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(JDBC_PREFIX) => &url[JDBC_PREFIX.len()..],
        _ => url,
    }
}

/// URL and credentials for a single connection attempt.
#[derive(Clone)]
pub struct ConnectParams {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A single, unpooled database connection.
#[async_trait]
pub trait SqlAdapter: Send {
    async fn connect(params: &ConnectParams) -> Result<Self, DbError>
    where
        Self: Sized;

    fn kind(&self) -> DatabaseKind;

    /// Runs `SELECT 1` and checks the answer.
    async fn ping(&mut self) -> Result<(), DbError>;

    /// Runs the counting query in a read-only transaction.
    async fn table_counts(&mut self, sql: &str) -> Result<Vec<TableCount>, DbError>;

    async fn close(self) -> Result<(), DbError>
    where
        Self: Sized;
}
