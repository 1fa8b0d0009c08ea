use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an aggregation or normalization run.
///
/// All variants are fatal to the invocation that raised them; no output file is
/// written once one of these has been returned.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed input in {origin}, line {line}: {reason}")]
    MalformedInput {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("Count arithmetic failed for sample '{sample}': {reason}")]
    Computation { sample: String, reason: String },

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CountError {
    pub fn config(msg: impl Into<String>) -> Self {
        CountError::Configuration(msg.into())
    }

    pub fn malformed(origin: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        CountError::MalformedInput {
            origin: origin.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CountError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CountResult<T> = Result<T, CountError>;
