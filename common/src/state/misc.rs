use crate::{
    config::Preset,
    crypto::Hash,
    merkle::{container_root, TreeHash},
    serializer::{fixed_part_size, Field, Reader, ReaderError, Serializer, Writer},
};

/// Fork versions active around an epoch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fork {
    pub previous_version: [u8; 4],
    pub current_version: [u8; 4],
    pub epoch: u64,
}

impl Fork {
    fn layout() -> [Field; 3] {
        [Field::Fixed(4), Field::Fixed(4), Field::Fixed(8)]
    }
}

impl Serializer for Fork {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        fixed_part_size(&Self::layout())
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let mut fields = reader.read_container(&Self::layout())?;
        Ok(Self {
            previous_version: fields.next()?,
            current_version: fields.next()?,
            epoch: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.previous_version);
        writer.write_bytes(&self.current_version);
        writer.write_u64(&self.epoch);
    }
}

impl TreeHash for Fork {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.previous_version.tree_hash_root(preset),
            self.current_version.tree_hash_root(preset),
            self.epoch.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checkpoint {
    pub epoch: u64,
    pub root: Hash,
}

impl Serializer for Checkpoint {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        40
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            epoch: reader.read_u64()?,
            root: reader.read_hash()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u64(&self.epoch);
        writer.write_hash(&self.root);
    }
}

impl TreeHash for Checkpoint {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![self.epoch.tree_hash_root(preset), self.root.clone()])
    }
}

/// Eth1 chain view voted on by proposers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eth1Data {
    pub deposit_root: Hash,
    pub deposit_count: u64,
    pub block_hash: Hash,
}

impl Serializer for Eth1Data {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        72
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            deposit_root: reader.read_hash()?,
            deposit_count: reader.read_u64()?,
            block_hash: reader.read_hash()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_hash(&self.deposit_root);
        writer.write_u64(&self.deposit_count);
        writer.write_hash(&self.block_hash);
    }
}

impl TreeHash for Eth1Data {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.deposit_root.clone(),
            self.deposit_count.tree_hash_root(preset),
            self.block_hash.clone(),
        ])
    }
}
