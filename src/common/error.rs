//! Error types for vmsim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in a simulation run.
///
/// Every variant is fatal: the simulation is a deterministic function of its
/// inputs, so a failure means the configuration or the trace is defective and
/// the run stops without producing a report.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading a trace.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame count was zero.
    #[error("number of frames must be positive, got {0}")]
    InvalidFrameCount(usize),

    /// Aging was selected without a refresh interval.
    #[error("refresh amount needs to be set when using aging")]
    MissingRefreshInterval,

    /// Aging was selected with a refresh interval of zero.
    #[error("refresh interval must be positive, got {0}")]
    InvalidRefreshInterval(u64),

    /// Policy selector is not one of `opt`, `clock`, `aging`, `lru`.
    #[error("unknown replacement policy '{0}' (expected opt, clock, aging or lru)")]
    UnknownPolicy(String),

    /// The optimal policy needs the whole future trace before it can start.
    #[error("the optimal policy requires a lookahead index built from the full trace")]
    MissingLookahead,

    /// A trace record is missing its mode or uses a mode other than `R`/`W`.
    #[error("malformed trace record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the trace.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },
}

impl Error {
    /// Whether this error was raised while validating configuration,
    /// before any reference was processed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidFrameCount(_)
                | Error::MissingRefreshInterval
                | Error::InvalidRefreshInterval(_)
                | Error::UnknownPolicy(_)
                | Error::MissingLookahead
        )
    }
}
