pub mod collector;
pub mod compare;
pub mod error;
pub mod report;

pub use collector::{CountSource, RowCountCollector};
pub use compare::{classify, compare};
pub use error::CollectError;
pub use report::{Report, TableReport};
