use std::fmt::{Display, Error, Formatter};

use crate::{
    config::Preset,
    crypto::{BlsSignature, Hash, BLS_SIGNATURE_SIZE},
    merkle::{container_root, TreeHash},
    serializer::{Reader, ReaderError, Serializer, Writer},
};

// slot + proposer_index + parent_root + state_root + body_root
pub const BLOCK_HEADER_SIZE: usize = 8 + 8 + 32 + 32 + 32;

/// Summary of a block, where the body is replaced by its root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeaconBlockHeader {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Hash,
    pub state_root: Hash,
    pub body_root: Hash,
}

impl Serializer for BeaconBlockHeader {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        BLOCK_HEADER_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            slot: reader.read_u64()?,
            proposer_index: reader.read_u64()?,
            parent_root: reader.read_hash()?,
            state_root: reader.read_hash()?,
            body_root: reader.read_hash()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u64(&self.slot);
        writer.write_u64(&self.proposer_index);
        writer.write_hash(&self.parent_root);
        writer.write_hash(&self.state_root);
        writer.write_hash(&self.body_root);
    }
}

impl TreeHash for BeaconBlockHeader {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.slot.tree_hash_root(preset),
            self.proposer_index.tree_hash_root(preset),
            self.parent_root.clone(),
            self.state_root.clone(),
            self.body_root.clone(),
        ])
    }
}

impl Display for BeaconBlockHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "BeaconBlockHeader[slot: {}, proposer: {}, parent: {}, body: {}]",
            self.slot, self.proposer_index, self.parent_root, self.body_root
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    pub signature: BlsSignature,
}

impl Serializer for SignedBeaconBlockHeader {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        BLOCK_HEADER_SIZE + BLS_SIGNATURE_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            message: BeaconBlockHeader::read(reader)?,
            signature: BlsSignature::new(reader.read_array()?),
        })
    }

    fn write(&self, writer: &mut Writer) {
        self.message.write(writer);
        self.signature.write(writer);
    }
}

impl TreeHash for SignedBeaconBlockHeader {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.message.tree_hash_root(preset),
            self.signature.tree_hash_root(preset),
        ])
    }
}
