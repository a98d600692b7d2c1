//! Phase0 `operations/block_header` conformance runner.
//!
//! Each case directory holds a snappy compressed SSZ block and pre state,
//! and optionally the expected post state. Without a post state the
//! transition is expected to fail.

pub mod compare;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fixtures;
pub mod invoker;
pub mod outcome;
pub mod runner;

pub use compare::{compare, ComparisonResult, Diff, FieldDiff};
pub use config::{ReportFormat, RunnerConfig};
pub use error::{CaseError, DecodeError, DiscoveryError, ReadError, TransitionError};
pub use invoker::{BlockHeaderTransition, Transition};
pub use runner::{CaseResult, RunReport, SpecRunner, TestStatus};
