//! Database connections for both sides of a migration check.
//!
//! [`factory::ConnectionFactory`] turns the side-scoped keys of
//! `application.properties` into a live [`sql::base::connection::DbConnection`].

pub mod error;
pub mod factory;
pub mod sql;

pub use error::ConnectorError;
pub use factory::ConnectionFactory;
pub use sql::base::{
    adapter::{DatabaseKind, SqlAdapter},
    connection::DbConnection,
    error::DbError,
};
