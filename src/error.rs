use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the metric computation or of user-supplied values feeding it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Reasons a generator transcript could not be turned into ranked lists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("missing `List 1: [...]` line")]
    MissingList1,
    #[error("missing `List 2: [...]` line")]
    MissingList2,
    #[error("missing `Your TopK = n` line")]
    MissingTopK,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
}

/// Failures of the external ranking generator. All of them are recoverable
/// through manual entry.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to start ranking generator `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("ranking generator exited with {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },

    #[error("unparsable ranking generator output: {0}")]
    Parse(#[from] ParseFailure),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("artifact I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
