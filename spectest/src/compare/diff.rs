use std::fmt::{Display, Error, Formatter};

use beacon_common::{
    bitfield::{Bitlist, JustificationBits},
    block::{AttestationData, BeaconBlockHeader, PendingAttestation},
    crypto::{BlsPublicKey, Hash},
    state::{BeaconState, Checkpoint, Eth1Data, Fork, Validator},
};
use serde::{Deserialize, Serialize};

/// One differing field: its path, the produced value and the expected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub path: String,
    pub left: String,
    pub right: String,
}

impl Display for FieldDiff {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}: {} != {}", self.path, self.left, self.right)
    }
}

/// Field by field comparison.
///
/// Implementors push one entry per differing leaf into `out`, prefixing the
/// field names with `path`.
pub trait Diff {
    fn diff(&self, other: &Self, path: &str, out: &mut Vec<FieldDiff>);
}

fn push(out: &mut Vec<FieldDiff>, path: &str, left: impl Display, right: impl Display) {
    out.push(FieldDiff {
        path: path.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    });
}

fn child(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

// Leaves compared with `==` and shown with `Display`
macro_rules! diff_leaf {
    ($($ty: ty),*) => {
        $(
            impl Diff for $ty {
                fn diff(&self, other: &Self, path: &str, out: &mut Vec<FieldDiff>) {
                    if self != other {
                        push(out, path, self, other);
                    }
                }
            }
        )*
    };
}

diff_leaf!(u64, bool, Hash, BlsPublicKey, Bitlist, JustificationBits);

impl Diff for [u8; 4] {
    fn diff(&self, other: &Self, path: &str, out: &mut Vec<FieldDiff>) {
        if self != other {
            push(out, path, to_hex(self), to_hex(other));
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// Sequences are compared element by element, in order
impl<T: Diff> Diff for Vec<T> {
    fn diff(&self, other: &Self, path: &str, out: &mut Vec<FieldDiff>) {
        if self.len() != other.len() {
            push(out, &format!("{}.len", path), self.len(), other.len());
        }
        for (i, (left, right)) in self.iter().zip(other.iter()).enumerate() {
            left.diff(right, &format!("{}[{}]", path, i), out);
        }
    }
}

// Containers visit every field, in declaration order
macro_rules! diff_fields {
    ($ty: ty { $($field: ident),* $(,)? }) => {
        impl Diff for $ty {
            fn diff(&self, other: &Self, path: &str, out: &mut Vec<FieldDiff>) {
                $(
                    self.$field.diff(&other.$field, &child(path, stringify!($field)), out);
                )*
            }
        }
    };
}

diff_fields!(Fork {
    previous_version,
    current_version,
    epoch,
});

diff_fields!(Checkpoint { epoch, root });

diff_fields!(Eth1Data {
    deposit_root,
    deposit_count,
    block_hash,
});

diff_fields!(BeaconBlockHeader {
    slot,
    proposer_index,
    parent_root,
    state_root,
    body_root,
});

diff_fields!(Validator {
    pubkey,
    withdrawal_credentials,
    effective_balance,
    slashed,
    activation_eligibility_epoch,
    activation_epoch,
    exit_epoch,
    withdrawable_epoch,
});

diff_fields!(AttestationData {
    slot,
    index,
    beacon_block_root,
    source,
    target,
});

diff_fields!(PendingAttestation {
    aggregation_bits,
    data,
    inclusion_delay,
    proposer_index,
});

diff_fields!(BeaconState {
    genesis_time,
    genesis_validators_root,
    slot,
    fork,
    latest_block_header,
    block_roots,
    state_roots,
    historical_roots,
    eth1_data,
    eth1_data_votes,
    eth1_deposit_index,
    validators,
    balances,
    randao_mixes,
    slashings,
    previous_epoch_attestations,
    current_epoch_attestations,
    justification_bits,
    previous_justified_checkpoint,
    current_justified_checkpoint,
    finalized_checkpoint,
});
