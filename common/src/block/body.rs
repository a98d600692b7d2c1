use std::fmt::{Display, Error, Formatter};

use crate::{
    config::Preset,
    crypto::{BlsSignature, Hash},
    merkle::{container_root, list_root, TreeHash},
    serializer::{ContainerWriter, Field, Reader, ReaderError, Serializer, Writer, OFFSET_SIZE},
    state::Eth1Data,
};

use super::{
    Attestation, AttesterSlashing, BeaconBlockHeader, Deposit, ProposerSlashing,
    SignedVoluntaryExit,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeaconBlockBody {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Hash,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
}

impl BeaconBlockBody {
    fn layout(preset: &Preset) -> [Field; 8] {
        [
            Field::of::<BlsSignature>(preset),
            Field::of::<Eth1Data>(preset),
            Field::of::<Hash>(preset),
            Field::Variable,
            Field::Variable,
            Field::Variable,
            Field::Variable,
            Field::Variable,
        ]
    }
}

impl Serializer for BeaconBlockBody {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let preset = reader.preset();
        let mut fields = reader.read_container(&Self::layout(preset))?;
        Ok(Self {
            randao_reveal: fields.next()?,
            eth1_data: fields.next()?,
            graffiti: fields.next()?,
            proposer_slashings: fields.next_list(preset.max_proposer_slashings)?,
            attester_slashings: fields.next_list(preset.max_attester_slashings)?,
            attestations: fields.next_list(preset.max_attestations)?,
            deposits: fields.next_list(preset.max_deposits)?,
            voluntary_exits: fields.next_list(preset.max_voluntary_exits)?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .field(&self.randao_reveal)
            .field(&self.eth1_data)
            .field(&self.graffiti)
            .list(&self.proposer_slashings)
            .list(&self.attester_slashings)
            .list(&self.attestations)
            .list(&self.deposits)
            .list(&self.voluntary_exits);
        container.finish(writer);
    }
}

impl TreeHash for BeaconBlockBody {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.randao_reveal.tree_hash_root(preset),
            self.eth1_data.tree_hash_root(preset),
            self.graffiti.clone(),
            list_root(
                &self.proposer_slashings,
                preset.max_proposer_slashings,
                preset,
            ),
            list_root(
                &self.attester_slashings,
                preset.max_attester_slashings,
                preset,
            ),
            list_root(&self.attestations, preset.max_attestations, preset),
            list_root(&self.deposits, preset.max_deposits, preset),
            list_root(&self.voluntary_exits, preset.max_voluntary_exits, preset),
        ])
    }
}

/// Unsigned phase0 block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeaconBlock {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Hash,
    pub state_root: Hash,
    pub body: BeaconBlockBody,
}

impl BeaconBlock {
    fn layout() -> [Field; 5] {
        [
            Field::Fixed(8),
            Field::Fixed(8),
            Field::Fixed(32),
            Field::Fixed(32),
            Field::Variable,
        ]
    }

    /// Header of this block, committing to the root of its body.
    pub fn to_header(&self, preset: &Preset) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root.clone(),
            state_root: self.state_root.clone(),
            body_root: self.body.tree_hash_root(preset),
        }
    }
}

impl Serializer for BeaconBlock {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let mut fields = reader.read_container(&Self::layout())?;
        Ok(Self {
            slot: fields.next()?,
            proposer_index: fields.next()?,
            parent_root: fields.next()?,
            state_root: fields.next()?,
            body: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .field(&self.slot)
            .field(&self.proposer_index)
            .field(&self.parent_root)
            .field(&self.state_root)
            .field(&self.body);
        container.finish(writer);
    }
}

// A block and its header share the same root
impl TreeHash for BeaconBlock {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        self.to_header(preset).tree_hash_root(preset)
    }
}

impl Display for BeaconBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "BeaconBlock[slot: {}, proposer: {}, parent: {}, attestations: {}, deposits: {}]",
            self.slot,
            self.proposer_index,
            self.parent_root,
            self.body.attestations.len(),
            self.body.deposits.len()
        )
    }
}
