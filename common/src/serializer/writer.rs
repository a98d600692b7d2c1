use crate::crypto::Hash;

use super::{Serializer, OFFSET_SIZE};

pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u32(&mut self, value: &u32) {
        self.bytes.extend(value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: &u64) {
        self.bytes.extend(value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    pub fn write_hash(&mut self, hash: &Hash) {
        self.bytes.extend(hash.as_bytes());
    }

    // Vector elements are fixed-size and written back to back
    pub fn write_vector<T: Serializer>(&mut self, items: &[T]) {
        for item in items {
            item.write(self);
        }
    }

    pub fn write_list<T: Serializer>(&mut self, items: &[T]) {
        if T::FIXED {
            self.write_vector(items);
            return;
        }

        let encoded: Vec<Vec<u8>> = items.iter().map(Serializer::to_bytes).collect();
        let mut offset = encoded.len() * OFFSET_SIZE;
        for item in &encoded {
            self.write_u32(&(offset as u32));
            offset += item.len();
        }
        for item in &encoded {
            self.write_bytes(item);
        }
    }

    pub fn total_write(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

enum Part {
    Bytes(Vec<u8>),
    // Index into the variable parts
    Offset(usize),
}

/// Builds a container encoding: fixed parts and offsets first, then the
/// variable parts in field order.
#[derive(Default)]
pub struct ContainerWriter {
    fixed: Vec<Part>,
    variable: Vec<Vec<u8>>,
}

impl ContainerWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<T: Serializer>(&mut self, value: &T) -> &mut Self {
        let bytes = value.to_bytes();
        if T::FIXED {
            self.fixed.push(Part::Bytes(bytes));
        } else {
            self.push_variable(bytes);
        }
        self
    }

    pub fn vector<T: Serializer>(&mut self, items: &[T]) -> &mut Self {
        let mut writer = Writer::new();
        writer.write_vector(items);
        self.fixed.push(Part::Bytes(writer.bytes()));
        self
    }

    pub fn list<T: Serializer>(&mut self, items: &[T]) -> &mut Self {
        let mut writer = Writer::new();
        writer.write_list(items);
        self.push_variable(writer.bytes());
        self
    }

    fn push_variable(&mut self, bytes: Vec<u8>) {
        self.fixed.push(Part::Offset(self.variable.len()));
        self.variable.push(bytes);
    }

    pub fn finish(self, writer: &mut Writer) {
        let fixed_len: usize = self
            .fixed
            .iter()
            .map(|part| match part {
                Part::Bytes(bytes) => bytes.len(),
                Part::Offset(_) => OFFSET_SIZE,
            })
            .sum();

        // Offsets are relative to the start of the container
        let mut offsets = Vec::with_capacity(self.variable.len());
        let mut offset = fixed_len;
        for bytes in &self.variable {
            offsets.push(offset);
            offset += bytes.len();
        }

        for part in &self.fixed {
            match part {
                Part::Bytes(bytes) => writer.write_bytes(bytes),
                Part::Offset(index) => writer.write_u32(&(offsets[*index] as u32)),
            }
        }
        for bytes in &self.variable {
            writer.write_bytes(bytes);
        }
    }
}
