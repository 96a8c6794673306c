use crate::sql::{
    base::{
        adapter::{ConnectParams, DatabaseKind, SqlAdapter},
        columns::{COL_TABLE_NAME, COL_TABLE_ROWS, column_index},
        count::{RawCount, row_count},
        error::DbError,
    },
    postgres::utils::connect_client,
};
use async_trait::async_trait;
use model::TableCount;
use rust_decimal::Decimal;
use tokio_postgres::{Client, Row, types::Type};
use tracing::debug;

pub struct PgAdapter {
    client: Client,
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn connect(params: &ConnectParams) -> Result<Self, DbError> {
        let client = connect_client(params).await?;
        Ok(PgAdapter { client })
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }

    async fn ping(&mut self) -> Result<(), DbError> {
        let row = self.client.query_one("SELECT 1", &[]).await?;
        let val: i32 = row.try_get(0)?;
        if val != 1 {
            return Err(DbError::UnexpectedPing(val.to_string()));
        }
        Ok(())
    }

    async fn table_counts(&mut self, sql: &str) -> Result<Vec<TableCount>, DbError> {
        let tx = self
            .client
            .build_transaction()
            .read_only(true)
            .start()
            .await?;
        let rows = tx.query(sql, &[]).await?;
        debug!("Counting query returned {} rows", rows.len());

        let counts = rows
            .iter()
            .map(table_count)
            .collect::<Result<Vec<_>, DbError>>()?;

        tx.rollback().await?;
        Ok(counts)
    }

    async fn close(self) -> Result<(), DbError> {
        // Dropping the client ends the spawned connection task.
        drop(self.client);
        Ok(())
    }
}

fn table_count(row: &Row) -> Result<TableCount, DbError> {
    let names = row.columns().iter().map(|c| c.name());
    let name_idx =
        column_index(names.clone(), COL_TABLE_NAME).ok_or(DbError::MissingColumn(COL_TABLE_NAME))?;
    let rows_idx =
        column_index(names, COL_TABLE_ROWS).ok_or(DbError::MissingColumn(COL_TABLE_ROWS))?;

    let table_name: String = row
        .try_get(name_idx)
        .map_err(|e| DbError::conversion(COL_TABLE_NAME, e))?;
    let table_rows = row_count(&table_name, raw_count(row, rows_idx)?)?;

    Ok(TableCount {
        table_name,
        table_rows,
    })
}

/// Reads the count column as whatever numeric type the query produced.
fn raw_count(row: &Row, idx: usize) -> Result<RawCount, DbError> {
    let ty = row.columns()[idx].type_();
    let convert = |e: tokio_postgres::Error| DbError::conversion(COL_TABLE_ROWS, e);

    let raw = if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)
            .map_err(convert)?
            .map(RawCount::Signed)
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)
            .map_err(convert)?
            .map(|v| RawCount::Signed(v.into()))
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .map_err(convert)?
            .map(|v| RawCount::Signed(v.into()))
    } else if *ty == Type::NUMERIC {
        row.try_get::<_, Option<Decimal>>(idx)
            .map_err(convert)?
            .map(RawCount::Decimal)
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)
            .map_err(convert)?
            .map(RawCount::Float)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .map_err(convert)?
            .map(|v| RawCount::Float(v.into()))
    } else {
        return Err(DbError::conversion(
            COL_TABLE_ROWS,
            format!("unsupported column type {ty}"),
        ));
    };

    Ok(raw.unwrap_or(RawCount::Null))
}
