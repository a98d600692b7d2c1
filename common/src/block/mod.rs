mod attestation;
mod body;
mod header;
mod operations;

pub use attestation::{Attestation, AttestationData, IndexedAttestation, PendingAttestation};
pub use body::{BeaconBlock, BeaconBlockBody};
pub use header::{BeaconBlockHeader, SignedBeaconBlockHeader, BLOCK_HEADER_SIZE};
pub use operations::{
    AttesterSlashing, Deposit, DepositData, ProposerSlashing, SignedVoluntaryExit, VoluntaryExit,
    DEPOSIT_PROOF_LENGTH,
};
