use std::fmt::{Display, Error, Formatter};

use crate::{
    bitfield::JustificationBits,
    block::{BeaconBlockHeader, PendingAttestation},
    config::Preset,
    crypto::Hash,
    merkle::{container_root, list_root, u64_list_root, u64_vector_root, vector_root, TreeHash},
    serializer::{ContainerWriter, Field, Reader, ReaderError, Serializer, Writer, OFFSET_SIZE},
};

use super::{Checkpoint, Eth1Data, Fork, Validator};

/// Full phase0 beacon state.
///
/// Vector fields always hold exactly the length set by the preset; list
/// fields are bounded by the preset limits. Both are checked on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconState {
    pub genesis_time: u64,
    pub genesis_validators_root: Hash,
    pub slot: u64,
    pub fork: Fork,
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: Vec<Hash>,
    pub state_roots: Vec<Hash>,
    pub historical_roots: Vec<Hash>,
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: Vec<Eth1Data>,
    pub eth1_deposit_index: u64,
    pub validators: Vec<Validator>,
    pub balances: Vec<u64>,
    pub randao_mixes: Vec<Hash>,
    pub slashings: Vec<u64>,
    pub previous_epoch_attestations: Vec<PendingAttestation>,
    pub current_epoch_attestations: Vec<PendingAttestation>,
    pub justification_bits: JustificationBits,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl BeaconState {
    /// Empty state at slot 0 with every vector sized for `preset`.
    pub fn new(preset: &Preset) -> Self {
        Self {
            genesis_time: 0,
            genesis_validators_root: Hash::zero(),
            slot: 0,
            fork: Fork::default(),
            latest_block_header: BeaconBlockHeader::default(),
            block_roots: vec![Hash::zero(); preset.slots_per_historical_root as usize],
            state_roots: vec![Hash::zero(); preset.slots_per_historical_root as usize],
            historical_roots: Vec::new(),
            eth1_data: Eth1Data::default(),
            eth1_data_votes: Vec::new(),
            eth1_deposit_index: 0,
            validators: Vec::new(),
            balances: Vec::new(),
            randao_mixes: vec![Hash::zero(); preset.epochs_per_historical_vector as usize],
            slashings: vec![0; preset.epochs_per_slashings_vector as usize],
            previous_epoch_attestations: Vec::new(),
            current_epoch_attestations: Vec::new(),
            justification_bits: JustificationBits::default(),
            previous_justified_checkpoint: Checkpoint::default(),
            current_justified_checkpoint: Checkpoint::default(),
            finalized_checkpoint: Checkpoint::default(),
        }
    }

    pub fn current_epoch(&self, preset: &Preset) -> u64 {
        self.slot / preset.slots_per_epoch
    }

    fn layout(preset: &Preset) -> [Field; 21] {
        [
            Field::Fixed(8),
            Field::Fixed(32),
            Field::Fixed(8),
            Field::of::<Fork>(preset),
            Field::of::<BeaconBlockHeader>(preset),
            Field::vector::<Hash>(preset.slots_per_historical_root, preset),
            Field::vector::<Hash>(preset.slots_per_historical_root, preset),
            Field::Variable,
            Field::of::<Eth1Data>(preset),
            Field::Variable,
            Field::Fixed(8),
            Field::Variable,
            Field::Variable,
            Field::vector::<Hash>(preset.epochs_per_historical_vector, preset),
            Field::vector::<u64>(preset.epochs_per_slashings_vector, preset),
            Field::Variable,
            Field::Variable,
            Field::of::<JustificationBits>(preset),
            Field::of::<Checkpoint>(preset),
            Field::of::<Checkpoint>(preset),
            Field::of::<Checkpoint>(preset),
        ]
    }
}

impl Serializer for BeaconState {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let preset = reader.preset();
        let mut fields = reader.read_container(&Self::layout(preset))?;
        Ok(Self {
            genesis_time: fields.next()?,
            genesis_validators_root: fields.next()?,
            slot: fields.next()?,
            fork: fields.next()?,
            latest_block_header: fields.next()?,
            block_roots: fields.next_vector(preset.slots_per_historical_root)?,
            state_roots: fields.next_vector(preset.slots_per_historical_root)?,
            historical_roots: fields.next_list(preset.historical_roots_limit)?,
            eth1_data: fields.next()?,
            eth1_data_votes: fields.next_list(preset.eth1_data_votes_limit())?,
            eth1_deposit_index: fields.next()?,
            validators: fields.next_list(preset.validator_registry_limit)?,
            balances: fields.next_list(preset.validator_registry_limit)?,
            randao_mixes: fields.next_vector(preset.epochs_per_historical_vector)?,
            slashings: fields.next_vector(preset.epochs_per_slashings_vector)?,
            previous_epoch_attestations: fields.next_list(preset.epoch_attestations_limit())?,
            current_epoch_attestations: fields.next_list(preset.epoch_attestations_limit())?,
            justification_bits: fields.next()?,
            previous_justified_checkpoint: fields.next()?,
            current_justified_checkpoint: fields.next()?,
            finalized_checkpoint: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .field(&self.genesis_time)
            .field(&self.genesis_validators_root)
            .field(&self.slot)
            .field(&self.fork)
            .field(&self.latest_block_header)
            .vector(&self.block_roots)
            .vector(&self.state_roots)
            .list(&self.historical_roots)
            .field(&self.eth1_data)
            .list(&self.eth1_data_votes)
            .field(&self.eth1_deposit_index)
            .list(&self.validators)
            .list(&self.balances)
            .vector(&self.randao_mixes)
            .vector(&self.slashings)
            .list(&self.previous_epoch_attestations)
            .list(&self.current_epoch_attestations)
            .field(&self.justification_bits)
            .field(&self.previous_justified_checkpoint)
            .field(&self.current_justified_checkpoint)
            .field(&self.finalized_checkpoint);
        container.finish(writer);
    }
}

impl TreeHash for BeaconState {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        let attestations_limit = preset.epoch_attestations_limit();
        container_root(vec![
            self.genesis_time.tree_hash_root(preset),
            self.genesis_validators_root.clone(),
            self.slot.tree_hash_root(preset),
            self.fork.tree_hash_root(preset),
            self.latest_block_header.tree_hash_root(preset),
            vector_root(&self.block_roots, preset),
            vector_root(&self.state_roots, preset),
            list_root(&self.historical_roots, preset.historical_roots_limit, preset),
            self.eth1_data.tree_hash_root(preset),
            list_root(
                &self.eth1_data_votes,
                preset.eth1_data_votes_limit(),
                preset,
            ),
            self.eth1_deposit_index.tree_hash_root(preset),
            list_root(&self.validators, preset.validator_registry_limit, preset),
            u64_list_root(&self.balances, preset.validator_registry_limit),
            vector_root(&self.randao_mixes, preset),
            u64_vector_root(&self.slashings),
            list_root(&self.previous_epoch_attestations, attestations_limit, preset),
            list_root(&self.current_epoch_attestations, attestations_limit, preset),
            self.justification_bits.tree_hash_root(),
            self.previous_justified_checkpoint.tree_hash_root(preset),
            self.current_justified_checkpoint.tree_hash_root(preset),
            self.finalized_checkpoint.tree_hash_root(preset),
        ])
    }
}

impl Display for BeaconState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "BeaconState[slot: {}, validators: {}, latest header slot: {}]",
            self.slot,
            self.validators.len(),
            self.latest_block_header.slot
        )
    }
}
