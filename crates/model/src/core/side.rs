use std::{fmt, str::FromStr};

/// One of the two databases taking part in a migration check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The pre-migration database.
    Source,
    /// The post-migration database.
    Target,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Source, Side::Target];

    /// Label used as configuration key prefix and in operator messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Side::Source),
            "target" => Ok(Side::Target),
            other => Err(format!("Unknown database side: {other}")),
        }
    }
}
