use beacon_common::crypto::Hash;
use thiserror::Error;

/// Failure of a block header check or of a helper it depends on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("Block slot {block} does not match state slot {state}")]
    SlotMismatch { block: u64, state: u64 },

    #[error("Block slot {block} is not newer than latest header slot {latest}")]
    SlotNotNewer { block: u64, latest: u64 },

    #[error("Invalid proposer index {block}, expected {expected}")]
    ProposerMismatch { block: u64, expected: u64 },

    #[error("Invalid parent root {block}, expected {expected}")]
    ParentRootMismatch { block: Hash, expected: Hash },

    #[error("Proposer {0} is slashed")]
    ProposerSlashed(u64),

    #[error("Validator {0} is not in the registry")]
    UnknownValidator(u64),

    #[error("No active validator at epoch {0}")]
    NoActiveValidators(u64),

    #[error("Index {index} is out of range for {count} elements")]
    IndexOutOfRange { index: u64, count: u64 },

    #[error("Randao mix {0} is missing from the state")]
    MissingRandaoMix(u64),
}
