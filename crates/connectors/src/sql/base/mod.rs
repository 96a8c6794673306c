pub mod adapter;
pub mod columns;
pub mod count;
pub mod connection;
pub mod error;
