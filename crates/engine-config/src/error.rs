use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying `application.properties`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// None of the candidate locations held a configuration file.
    #[error("File {file_name} not found.")]
    Missing {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    /// The file exists but could not be read.
    #[error("Error to load {file_name} file due error : {source}")]
    Unreadable {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    /// One or more required keys are absent.
    #[error("Properties {} not set in application.properties file.", .missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

impl ConfigError {
    pub fn incomplete<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigError::Incomplete {
            missing: keys.into_iter().map(Into::into).collect(),
        }
    }
}
