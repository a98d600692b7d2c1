use std::fmt::{Display, Error, Formatter};

use log::debug;

use crate::{
    config::{Preset, JUSTIFICATION_BITS_LENGTH},
    crypto::Hash,
    merkle::{merkleize, mix_in_length, pack_bytes, BYTES_PER_CHUNK},
    serializer::{Reader, ReaderError, Serializer, Writer, OFFSET_SIZE},
};

/// Variable-length bitfield. Serialized with a trailing delimiter bit that
/// marks the length; the delimiter is not part of the tree hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitlist {
    len: usize,
    // Packed little-endian bits, without the delimiter
    bytes: Vec<u8>,
}

impl Bitlist {
    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            bytes: vec![0; len.div_ceil(8)],
        }
    }

    pub fn from_bools(bits: &[bool]) -> Self {
        let mut bitlist = Self::with_len(bits.len());
        for (i, bit) in bits.iter().enumerate() {
            bitlist.set(i, *bit);
        }
        bitlist
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] >> (index % 8) & 1 == 1)
    }

    // Out of range indexes are ignored
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.len {
            return;
        }
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] >> (i % 8) & 1 == 1)
    }

    pub fn read_bounded(reader: &mut Reader, limit: u64) -> Result<Self, ReaderError> {
        let bitlist = Self::read(reader)?;
        if bitlist.len as u64 > limit {
            return Err(ReaderError::LimitExceeded {
                count: bitlist.len as u64,
                limit,
            });
        }
        Ok(bitlist)
    }

    pub fn tree_hash_root(&self, limit: u64) -> Hash {
        let chunk_limit = limit.div_ceil(8 * BYTES_PER_CHUNK as u64);
        let root = merkleize(pack_bytes(&self.bytes), chunk_limit);
        mix_in_length(&root, self.len as u64)
    }
}

impl Serializer for Bitlist {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let raw = reader.read_rest();
        let last = match raw.last() {
            Some(last) if *last != 0 => *last,
            _ => {
                debug!("Error, bitlist is missing its delimiter bit");
                return Err(ReaderError::InvalidValue);
            }
        };

        let delimiter = 7 - last.leading_zeros() as usize;
        let len = (raw.len() - 1) * 8 + delimiter;
        let mut bytes = raw.to_vec();
        if let Some(last) = bytes.last_mut() {
            *last &= !(1u8 << delimiter);
        }
        bytes.truncate(len.div_ceil(8));

        Ok(Self { len, bytes })
    }

    fn write(&self, writer: &mut Writer) {
        let mut bytes = vec![0u8; self.len / 8 + 1];
        bytes[..self.bytes.len()].copy_from_slice(&self.bytes);
        bytes[self.len / 8] |= 1 << (self.len % 8);
        writer.write_bytes(&bytes);
    }
}

impl Display for Bitlist {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let bits: String = self.iter().map(|b| if b { '1' } else { '0' }).collect();
        write!(f, "0b{}", bits)
    }
}

/// Justification bits of the state, a Bitvector[4].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JustificationBits(u8);

impl JustificationBits {
    pub fn new(bits: u8) -> Result<Self, ReaderError> {
        if bits >> JUSTIFICATION_BITS_LENGTH != 0 {
            return Err(ReaderError::InvalidValue);
        }
        Ok(Self(bits))
    }

    pub fn get(&self, index: usize) -> bool {
        index < JUSTIFICATION_BITS_LENGTH && self.0 >> index & 1 == 1
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn tree_hash_root(&self) -> Hash {
        let mut bytes = [0u8; BYTES_PER_CHUNK];
        bytes[0] = self.0;
        Hash::new(bytes)
    }
}

impl Serializer for JustificationBits {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        1
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Self::new(reader.read_u8()?)
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.0);
    }
}

impl Display for JustificationBits {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "0b{:04b}", self.0)
    }
}
