use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// Constants shared by every preset
pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;
pub const GENESIS_EPOCH: u64 = 0;
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;
// Domain used when deriving the proposer seed
pub const DOMAIN_BEACON_PROPOSER: [u8; 4] = [0x00, 0x00, 0x00, 0x00];
// Justification bits are a Bitvector[4]
pub const JUSTIFICATION_BITS_LENGTH: usize = 4;

/// Name of a fixture configuration, as it appears in the fixture tree
/// (`<root>/<config>/phase0/...`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConfigName {
    Minimal,
    Mainnet,
}

impl ConfigName {
    pub fn preset(&self) -> Preset {
        match self {
            ConfigName::Minimal => Preset::minimal(),
            ConfigName::Mainnet => Preset::mainnet(),
        }
    }
}

/// Phase0 preset values.
///
/// Vector lengths and list limits change the SSZ layout of the state, so the
/// same preset must be used for decoding and for the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: ConfigName,
    pub max_committees_per_slot: u64,
    pub target_committee_size: u64,
    pub max_validators_per_committee: u64,
    pub shuffle_round_count: u8,
    pub slots_per_epoch: u64,
    pub min_seed_lookahead: u64,
    pub epochs_per_eth1_voting_period: u64,
    pub slots_per_historical_root: u64,
    pub epochs_per_historical_vector: u64,
    pub epochs_per_slashings_vector: u64,
    pub historical_roots_limit: u64,
    pub validator_registry_limit: u64,
    pub max_effective_balance: u64,
    pub max_proposer_slashings: u64,
    pub max_attester_slashings: u64,
    pub max_attestations: u64,
    pub max_deposits: u64,
    pub max_voluntary_exits: u64,
}

impl Preset {
    pub fn minimal() -> Self {
        Self {
            name: ConfigName::Minimal,
            max_committees_per_slot: 4,
            target_committee_size: 4,
            max_validators_per_committee: 2048,
            shuffle_round_count: 10,
            slots_per_epoch: 8,
            min_seed_lookahead: 1,
            epochs_per_eth1_voting_period: 4,
            slots_per_historical_root: 64,
            epochs_per_historical_vector: 64,
            epochs_per_slashings_vector: 64,
            historical_roots_limit: 16_777_216,
            validator_registry_limit: 1_099_511_627_776,
            max_effective_balance: 32_000_000_000,
            max_proposer_slashings: 16,
            max_attester_slashings: 2,
            max_attestations: 128,
            max_deposits: 16,
            max_voluntary_exits: 16,
        }
    }

    pub fn mainnet() -> Self {
        Self {
            name: ConfigName::Mainnet,
            max_committees_per_slot: 64,
            target_committee_size: 128,
            shuffle_round_count: 90,
            slots_per_epoch: 32,
            epochs_per_eth1_voting_period: 64,
            slots_per_historical_root: 8192,
            epochs_per_historical_vector: 65_536,
            epochs_per_slashings_vector: 8192,
            ..Self::minimal()
        }
    }

    // Eth1 votes are capped at one per slot of the voting period
    pub fn eth1_data_votes_limit(&self) -> u64 {
        self.epochs_per_eth1_voting_period * self.slots_per_epoch
    }

    // Pending attestations kept per epoch
    pub fn epoch_attestations_limit(&self) -> u64 {
        self.max_attestations * self.slots_per_epoch
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::minimal()
    }
}
