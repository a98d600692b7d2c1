//! Error types for fixture discovery and case execution.

use std::{error::Error as StdError, io::Error as IoError, path::PathBuf};

use beacon_common::serializer::ReaderError;
use thiserror::Error;

use crate::{compare::FieldDiff, decoder::RecordKind};

/// Failure to enumerate the cases of a run. Always aborts the run.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Fixture directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No test cases found in {}", .0.display())]
    Empty(PathBuf),

    #[error("Cannot list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

/// Failure to read one file of a case.
///
/// `Absent` is only raised when the file does not exist; every other failure
/// is `Io`, so a missing optional file can never be confused with an
/// unreadable one.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File {} does not exist", .0.display())]
    Absent(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Corrupt snappy stream for {kind}: {source}")]
    CorruptStream {
        kind: RecordKind,
        #[source]
        source: snap::Error,
    },

    #[error("Malformed {kind} record: {source}")]
    MalformedRecord {
        kind: RecordKind,
        #[source]
        source: ReaderError,
    },
}

/// Error returned by the transition under test.
///
/// The runner never looks inside it: an expected-failure case accepts any
/// transition error.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct TransitionError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl TransitionError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Reason a single case failed.
#[derive(Error, Debug)]
pub enum CaseError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Transition failed: {0}")]
    Transition(#[from] TransitionError),

    #[error("Did not fail when expected")]
    UnexpectedSuccess,

    #[error("Post state does not match expected ({} differing fields)", .0.len())]
    Mismatch(Vec<FieldDiff>),
}

impl CaseError {
    /// Differing fields when the case failed on a state mismatch.
    pub fn diff(&self) -> &[FieldDiff] {
        match self {
            CaseError::Mismatch(diff) => diff,
            _ => &[],
        }
    }
}
