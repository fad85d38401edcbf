//! Error types shared across the quizdrill crates.
//!
//! Defined in `quizdrill-core` so the loader and the CLI can classify
//! failures without string matching: a missing optional source, a malformed
//! record, and a misuse of the session API are three different things.

use thiserror::Error;

/// Errors from fetching raw bank text through a `TextSource`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source id does not exist at the backing store.
    #[error("source not found: {0}")]
    NotFound(String),

    /// A local I/O failure other than the file being missing.
    #[error("io error reading {id}: {message}")]
    Io { id: String, message: String },

    /// The backing HTTP endpoint returned an error response.
    #[error("HTTP {status} fetching {id}")]
    Http { id: String, status: u16 },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl SourceError {
    /// Returns `true` if the source simply does not exist, as opposed to
    /// being temporarily unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Errors from assembling a bank out of configured sources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The first configured source could not be fetched. The first source
    /// is the backbone of the bank; without it there is nothing to quiz.
    #[error("mandatory source '{source_id}' unavailable")]
    SourceUnavailable {
        source_id: String,
        #[source]
        source: SourceError,
    },
}

/// A malformed bank record.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The line split into fewer cells than a record needs.
    #[error("expected 8 cells, found {found}")]
    TooFewFields { found: usize },

    /// The answer cell did not parse as an integer.
    #[error("answer cell is not a number: '{cell}'")]
    InvalidAnswerNumber { cell: String },

    /// The answer number does not point at one of the options.
    #[error("answer number {number} outside 1..=4")]
    AnswerOutOfRange { number: i64 },
}

/// Errors from driving a `QuizSession`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Sessions refuse to start over an empty question list.
    #[error("cannot start a session with no questions")]
    Empty,

    /// The submitted answer index cannot address any option. This is a bug
    /// in the driving layer, not a wrong quiz answer.
    #[error("answer index {chosen} out of range (must be below {limit})")]
    InvalidAnswerIndex { chosen: usize, limit: usize },

    /// `advance` was called while the current question still awaits an
    /// answer.
    #[error("current question has no recorded answer yet")]
    AnswerRequired,

    /// The session is already finished.
    #[error("session is already finished")]
    Finished,

    /// The score was requested before the session finished.
    #[error("session is not finished yet")]
    NotFinished,
}
