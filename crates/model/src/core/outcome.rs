use std::fmt;

/// Classification of a single source table after both sides were counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Present on both sides with equal counts.
    Match { source: u64, target: u64 },
    /// Present on both sides with different counts.
    Mismatch { source: u64, target: u64 },
    /// Present on the source only.
    MissingTarget { source: u64 },
}

impl Outcome {
    pub fn classify(source: u64, target: Option<u64>) -> Self {
        match target {
            None => Outcome::MissingTarget { source },
            Some(target) if target != source => Outcome::Mismatch { source, target },
            Some(target) => Outcome::Match { source, target },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Match { .. })
    }

    /// The `source/target` comparison string, absent when the target has no such table.
    pub fn comparison(&self) -> Option<String> {
        match self {
            Outcome::Match { source, target } | Outcome::Mismatch { source, target } => {
                Some(format!("{source}/{target}"))
            }
            Outcome::MissingTarget { .. } => None,
        }
    }

    /// Remediation advice printed after failed tables.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Outcome::Match { .. } => None,
            Outcome::Mismatch { .. } => Some("execute truncate on target and re-execute pipeline"),
            Outcome::MissingTarget { .. } => {
                Some("check version is the same and re-execute deploy with migration option")
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Match { .. } => f.write_str("MATCH"),
            Outcome::Mismatch { .. } => f.write_str("MISMATCH"),
            Outcome::MissingTarget { .. } => f.write_str("MISSING_TARGET"),
        }
    }
}
