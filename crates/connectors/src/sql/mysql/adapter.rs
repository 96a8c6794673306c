use crate::sql::base::{
    adapter::{ConnectParams, DatabaseKind, SqlAdapter},
    columns::{COL_TABLE_NAME, COL_TABLE_ROWS, column_index},
    count::{RawCount, row_count},
    error::DbError,
};
use async_trait::async_trait;
use model::TableCount;
use mysql_async::{Conn, Opts, OptsBuilder, Row, TxOpts, Value, prelude::*};
use tracing::debug;

pub struct MySqlAdapter {
    conn: Conn,
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(params: &ConnectParams) -> Result<Self, DbError> {
        let opts = Opts::from_url(&params.url).map_err(|e| DbError::InvalidUrl(e.to_string()))?;
        let opts = OptsBuilder::from_opts(opts)
            .user(Some(params.username.as_str()))
            .pass(Some(params.password.as_str()));
        let conn = Conn::new(opts).await?;
        Ok(MySqlAdapter { conn })
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    async fn ping(&mut self) -> Result<(), DbError> {
        let val: Option<i32> = self.conn.query_first("SELECT 1").await?;
        match val {
            Some(1) => Ok(()),
            Some(other) => Err(DbError::UnexpectedPing(other.to_string())),
            None => Err(DbError::UnexpectedPing("no result".to_string())),
        }
    }

    async fn table_counts(&mut self, sql: &str) -> Result<Vec<TableCount>, DbError> {
        let mut tx_opts = TxOpts::default();
        tx_opts.with_readonly(true);

        let mut tx = self.conn.start_transaction(tx_opts).await?;
        let rows: Vec<Row> = tx.query(sql).await?;
        debug!("Counting query returned {} rows", rows.len());

        let counts = rows
            .iter()
            .map(table_count)
            .collect::<Result<Vec<_>, DbError>>()?;

        tx.rollback().await?;
        Ok(counts)
    }

    async fn close(self) -> Result<(), DbError> {
        self.conn.disconnect().await?;
        Ok(())
    }
}

fn table_count(row: &Row) -> Result<TableCount, DbError> {
    let columns = row.columns_ref();
    let names: Vec<_> = columns.iter().map(|c| c.name_str()).collect();
    let name_idx = column_index(names.iter().map(|n| &**n), COL_TABLE_NAME)
        .ok_or(DbError::MissingColumn(COL_TABLE_NAME))?;
    let rows_idx = column_index(names.iter().map(|n| &**n), COL_TABLE_ROWS)
        .ok_or(DbError::MissingColumn(COL_TABLE_ROWS))?;

    let table_name: String = match row.get_opt(name_idx) {
        Some(Ok(name)) => name,
        Some(Err(e)) => return Err(DbError::conversion(COL_TABLE_NAME, e)),
        None => return Err(DbError::MissingColumn(COL_TABLE_NAME)),
    };

    let raw = match row.as_ref(rows_idx) {
        Some(value) => raw_count(value)?,
        None => return Err(DbError::MissingColumn(COL_TABLE_ROWS)),
    };
    let table_rows = row_count(&table_name, raw)?;

    Ok(TableCount {
        table_name,
        table_rows,
    })
}

/// Maps a column value to a count. Plain queries return every value as text.
fn raw_count(value: &Value) -> Result<RawCount, DbError> {
    let raw = match value {
        Value::NULL => Some(RawCount::Null),
        Value::Int(v) => Some(RawCount::Signed(*v)),
        Value::UInt(v) => Some(RawCount::Unsigned(*v)),
        Value::Float(v) => Some(RawCount::Float((*v).into())),
        Value::Double(v) => Some(RawCount::Float(*v)),
        Value::Bytes(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(RawCount::parse_text),
        Value::Date(..) | Value::Time(..) => None,
    };

    raw.ok_or_else(|| {
        DbError::conversion(COL_TABLE_ROWS, format!("not a number: {value:?}"))
    })
}
