pub mod error;
pub mod keys;
pub mod locate;
pub mod properties;

pub use error::ConfigError;
pub use keys::SideKeys;
pub use properties::Properties;
