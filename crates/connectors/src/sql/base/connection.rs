use crate::sql::{
    base::{
        adapter::{ConnectParams, DatabaseKind, SqlAdapter},
        error::DbError,
    },
    mysql::adapter::MySqlAdapter,
    postgres::adapter::PgAdapter,
};
use model::TableCount;

/// A live connection to one side, dispatching to the matching driver.
pub enum DbConnection {
    Postgres(PgAdapter),
    MySql(MySqlAdapter),
}

impl DbConnection {
    pub async fn connect(kind: DatabaseKind, params: &ConnectParams) -> Result<Self, DbError> {
        match kind {
            DatabaseKind::Postgres => PgAdapter::connect(params).await.map(DbConnection::Postgres),
            DatabaseKind::MySql => MySqlAdapter::connect(params).await.map(DbConnection::MySql),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        match self {
            DbConnection::Postgres(adapter) => adapter.kind(),
            DbConnection::MySql(adapter) => adapter.kind(),
        }
    }

    pub async fn ping(&mut self) -> Result<(), DbError> {
        match self {
            DbConnection::Postgres(adapter) => adapter.ping().await,
            DbConnection::MySql(adapter) => adapter.ping().await,
        }
    }

    pub async fn table_counts(&mut self, sql: &str) -> Result<Vec<TableCount>, DbError> {
        match self {
            DbConnection::Postgres(adapter) => adapter.table_counts(sql).await,
            DbConnection::MySql(adapter) => adapter.table_counts(sql).await,
        }
    }

    pub async fn close(self) -> Result<(), DbError> {
        match self {
            DbConnection::Postgres(adapter) => adapter.close().await,
            DbConnection::MySql(adapter) => adapter.close().await,
        }
    }
}
