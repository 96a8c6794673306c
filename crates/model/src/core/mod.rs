pub mod outcome;
pub mod side;
