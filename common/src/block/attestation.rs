use crate::{
    bitfield::Bitlist,
    config::Preset,
    crypto::{BlsSignature, Hash},
    merkle::{container_root, u64_list_root, TreeHash},
    serializer::{ContainerWriter, Field, Reader, ReaderError, Serializer, Writer, OFFSET_SIZE},
    state::Checkpoint,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttestationData {
    pub slot: u64,
    pub index: u64,
    pub beacon_block_root: Hash,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

impl Serializer for AttestationData {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        128
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            slot: reader.read_u64()?,
            index: reader.read_u64()?,
            beacon_block_root: reader.read_hash()?,
            source: Checkpoint::read(reader)?,
            target: Checkpoint::read(reader)?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u64(&self.slot);
        writer.write_u64(&self.index);
        writer.write_hash(&self.beacon_block_root);
        self.source.write(writer);
        self.target.write(writer);
    }
}

impl TreeHash for AttestationData {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.slot.tree_hash_root(preset),
            self.index.tree_hash_root(preset),
            self.beacon_block_root.clone(),
            self.source.tree_hash_root(preset),
            self.target.tree_hash_root(preset),
        ])
    }
}

/// Attestation waiting in the state for epoch processing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingAttestation {
    pub aggregation_bits: Bitlist,
    pub data: AttestationData,
    pub inclusion_delay: u64,
    pub proposer_index: u64,
}

impl PendingAttestation {
    fn layout(preset: &Preset) -> [Field; 4] {
        [
            Field::Variable,
            Field::of::<AttestationData>(preset),
            Field::Fixed(8),
            Field::Fixed(8),
        ]
    }
}

impl Serializer for PendingAttestation {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let preset = reader.preset();
        let limit = preset.max_validators_per_committee;
        let mut fields = reader.read_container(&Self::layout(preset))?;
        Ok(Self {
            aggregation_bits: fields.next_with(|r| Bitlist::read_bounded(r, limit))?,
            data: fields.next()?,
            inclusion_delay: fields.next()?,
            proposer_index: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .field(&self.aggregation_bits)
            .field(&self.data)
            .field(&self.inclusion_delay)
            .field(&self.proposer_index);
        container.finish(writer);
    }
}

impl TreeHash for PendingAttestation {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.aggregation_bits
                .tree_hash_root(preset.max_validators_per_committee),
            self.data.tree_hash_root(preset),
            self.inclusion_delay.tree_hash_root(preset),
            self.proposer_index.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexedAttestation {
    pub attesting_indices: Vec<u64>,
    pub data: AttestationData,
    pub signature: BlsSignature,
}

impl IndexedAttestation {
    fn layout(preset: &Preset) -> [Field; 3] {
        [
            Field::Variable,
            Field::of::<AttestationData>(preset),
            Field::of::<BlsSignature>(preset),
        ]
    }
}

impl Serializer for IndexedAttestation {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let preset = reader.preset();
        let limit = preset.max_validators_per_committee;
        let mut fields = reader.read_container(&Self::layout(preset))?;
        Ok(Self {
            attesting_indices: fields.next_list(limit)?,
            data: fields.next()?,
            signature: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .list(&self.attesting_indices)
            .field(&self.data)
            .field(&self.signature);
        container.finish(writer);
    }
}

impl TreeHash for IndexedAttestation {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            u64_list_root(
                &self.attesting_indices,
                preset.max_validators_per_committee,
            ),
            self.data.tree_hash_root(preset),
            self.signature.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attestation {
    pub aggregation_bits: Bitlist,
    pub data: AttestationData,
    pub signature: BlsSignature,
}

impl Serializer for Attestation {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let preset = reader.preset();
        let limit = preset.max_validators_per_committee;
        // Same fixed part as an indexed attestation
        let mut fields = reader.read_container(&IndexedAttestation::layout(preset))?;
        Ok(Self {
            aggregation_bits: fields.next_with(|r| Bitlist::read_bounded(r, limit))?,
            data: fields.next()?,
            signature: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .field(&self.aggregation_bits)
            .field(&self.data)
            .field(&self.signature);
        container.finish(writer);
    }
}

impl TreeHash for Attestation {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.aggregation_bits
                .tree_hash_root(preset.max_validators_per_committee),
            self.data.tree_hash_root(preset),
            self.signature.tree_hash_root(preset),
        ])
    }
}
