pub mod core;
pub mod records;

pub use crate::core::{outcome::Outcome, side::Side};
pub use crate::records::count::{CountMap, TableCount};
