use log::debug;
use thiserror::Error;

use crate::{config::Preset, crypto::Hash};

use super::{Serializer, OFFSET_SIZE};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Invalid size")]
    InvalidSize,
    #[error("Invalid offset")]
    InvalidOffset,
    #[error("Invalid value")]
    InvalidValue,
    #[error("Invalid hex")]
    InvalidHex,
    #[error("List of {count} elements exceeds limit {limit}")]
    LimitExceeded { count: u64, limit: u64 },
}

/// Layout of one container field, used to split the fixed part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Fixed(usize),
    Variable,
}

impl Field {
    pub fn of<T: Serializer>(preset: &Preset) -> Field {
        if T::FIXED {
            Field::Fixed(T::fixed_size(preset))
        } else {
            Field::Variable
        }
    }

    // Vector of fixed-size elements
    pub fn vector<T: Serializer>(length: u64, preset: &Preset) -> Field {
        Field::Fixed(T::fixed_size(preset) * length as usize)
    }

    fn fixed_len(&self) -> usize {
        match self {
            Field::Fixed(size) => *size,
            Field::Variable => OFFSET_SIZE,
        }
    }
}

/// Length of the fixed part of a container with the given layout.
pub fn fixed_part_size(fields: &[Field]) -> usize {
    fields.iter().map(Field::fixed_len).sum()
}

/// Reader over the exact encoding of one value.
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
    preset: &'a Preset,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8], preset: &'a Preset) -> Self {
        Self {
            bytes,
            position: 0,
            preset,
        }
    }

    pub fn preset(&self) -> &'a Preset {
        self.preset
    }

    pub fn size(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn total_read(&self) -> usize {
        self.position
    }

    pub fn read_bytes_ref(&mut self, n: usize) -> Result<&'a [u8], ReaderError> {
        if n > self.size() {
            return Err(ReaderError::InvalidSize);
        }

        let bytes = &self.bytes[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReaderError> {
        let bytes = self.read_bytes_ref(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, ReaderError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, ReaderError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => {
                debug!("Error, invalid boolean byte: {}", value);
                Err(ReaderError::InvalidValue)
            }
        }
    }

    pub fn read_hash(&mut self) -> Result<Hash, ReaderError> {
        Ok(Hash::new(self.read_array()?))
    }

    // Take every byte not read yet
    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.bytes[self.position..];
        self.position = self.bytes.len();
        bytes
    }

    /// Fails when bytes are left unread.
    pub fn finish(self) -> Result<(), ReaderError> {
        if self.size() != 0 {
            debug!("Error, {} trailing bytes left", self.size());
            return Err(ReaderError::InvalidSize);
        }
        Ok(())
    }

    /// Decode a vector of `length` fixed-size elements from the remaining bytes.
    pub fn read_vector<T: Serializer>(&mut self, length: u64) -> Result<Vec<T>, ReaderError> {
        let size = T::fixed_size(self.preset);
        let bytes = self.read_rest();
        if !T::FIXED || bytes.len() != size * length as usize {
            return Err(ReaderError::InvalidSize);
        }

        bytes
            .chunks(size)
            .map(|chunk| T::from_bytes(chunk, self.preset))
            .collect()
    }

    /// Decode a list bounded by `limit` from the remaining bytes.
    pub fn read_list<T: Serializer>(&mut self, limit: u64) -> Result<Vec<T>, ReaderError> {
        let preset = self.preset;
        let bytes = self.read_rest();

        if T::FIXED {
            let size = T::fixed_size(preset);
            if size == 0 || bytes.len() % size != 0 {
                return Err(ReaderError::InvalidSize);
            }

            let count = (bytes.len() / size) as u64;
            if count > limit {
                return Err(ReaderError::LimitExceeded { count, limit });
            }

            return bytes
                .chunks(size)
                .map(|chunk| T::from_bytes(chunk, preset))
                .collect();
        }

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        // The first offset also tells how many offsets there are
        let first = read_offset(bytes, 0)?;
        if first == 0 || first % OFFSET_SIZE != 0 || first > bytes.len() {
            return Err(ReaderError::InvalidOffset);
        }

        let count = first / OFFSET_SIZE;
        if count as u64 > limit {
            return Err(ReaderError::LimitExceeded {
                count: count as u64,
                limit,
            });
        }

        let offsets = (0..count)
            .map(|i| read_offset(bytes, i * OFFSET_SIZE))
            .collect::<Result<Vec<_>, _>>()?;

        let mut items = Vec::with_capacity(count);
        for (i, start) in offsets.iter().enumerate() {
            let end = offsets.get(i + 1).copied().unwrap_or(bytes.len());
            if *start > end || end > bytes.len() {
                return Err(ReaderError::InvalidOffset);
            }
            items.push(T::from_bytes(&bytes[*start..end], preset)?);
        }

        Ok(items)
    }

    /// Split the remaining bytes into one slice per container field.
    pub fn read_container(&mut self, fields: &[Field]) -> Result<Fields<'a>, ReaderError> {
        let bytes = self.read_rest();
        let fixed_len = fixed_part_size(fields);
        if bytes.len() < fixed_len {
            return Err(ReaderError::InvalidSize);
        }

        let mut parts: Vec<&'a [u8]> = Vec::with_capacity(fields.len());
        // (field index, offset) for every variable field
        let mut offsets: Vec<(usize, usize)> = Vec::new();
        let mut position = 0;
        for field in fields {
            match field {
                Field::Fixed(size) => {
                    parts.push(&bytes[position..position + size]);
                    position += size;
                }
                Field::Variable => {
                    offsets.push((parts.len(), read_offset(bytes, position)?));
                    parts.push(&[]);
                    position += OFFSET_SIZE;
                }
            }
        }

        match offsets.first() {
            Some((_, first)) if *first != fixed_len => {
                debug!(
                    "Error, first offset {} does not match fixed part length {}",
                    first, fixed_len
                );
                return Err(ReaderError::InvalidOffset);
            }
            None if bytes.len() != fixed_len => return Err(ReaderError::InvalidSize),
            _ => {}
        }

        for (i, (index, start)) in offsets.iter().enumerate() {
            let end = offsets
                .get(i + 1)
                .map(|(_, offset)| *offset)
                .unwrap_or(bytes.len());
            if *start > end || end > bytes.len() {
                return Err(ReaderError::InvalidOffset);
            }
            parts[*index] = &bytes[*start..end];
        }

        Ok(Fields {
            parts: parts.into_iter(),
            preset: self.preset,
        })
    }
}

fn read_offset(bytes: &[u8], position: usize) -> Result<usize, ReaderError> {
    let slice = bytes
        .get(position..position + OFFSET_SIZE)
        .ok_or(ReaderError::InvalidOffset)?;
    let mut offset = [0u8; OFFSET_SIZE];
    offset.copy_from_slice(slice);
    Ok(u32::from_le_bytes(offset) as usize)
}

/// Field slices of a container, consumed in declaration order.
pub struct Fields<'a> {
    parts: std::vec::IntoIter<&'a [u8]>,
    preset: &'a Preset,
}

impl<'a> Fields<'a> {
    pub fn next_with<T, F>(&mut self, f: F) -> Result<T, ReaderError>
    where
        F: FnOnce(&mut Reader<'a>) -> Result<T, ReaderError>,
    {
        let part = self.parts.next().ok_or(ReaderError::InvalidSize)?;
        let mut reader = Reader::new(part, self.preset);
        let value = f(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }

    pub fn next<T: Serializer>(&mut self) -> Result<T, ReaderError> {
        self.next_with(T::read)
    }

    pub fn next_vector<T: Serializer>(&mut self, length: u64) -> Result<Vec<T>, ReaderError> {
        self.next_with(|reader| reader.read_vector(length))
    }

    pub fn next_list<T: Serializer>(&mut self, limit: u64) -> Result<Vec<T>, ReaderError> {
        self.next_with(|reader| reader.read_list(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_container_offsets() {
        let preset = Preset::minimal();
        // u64 | offset -> [u64; 2]
        let mut bytes = Vec::new();
        bytes.extend(5u64.to_le_bytes());
        bytes.extend(12u32.to_le_bytes());
        bytes.extend(1u64.to_le_bytes());
        bytes.extend(2u64.to_le_bytes());

        let mut reader = Reader::new(&bytes, &preset);
        let mut fields = reader
            .read_container(&[Field::Fixed(8), Field::Variable])
            .unwrap();
        assert_eq!(fields.next::<u64>().unwrap(), 5);
        assert_eq!(fields.next_list::<u64>(4).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_read_container_rejects_bad_first_offset() {
        let preset = Preset::minimal();
        let mut bytes = Vec::new();
        bytes.extend(5u64.to_le_bytes());
        bytes.extend(16u32.to_le_bytes());
        bytes.extend(1u64.to_le_bytes());

        let mut reader = Reader::new(&bytes, &preset);
        assert!(matches!(
            reader.read_container(&[Field::Fixed(8), Field::Variable]),
            Err(ReaderError::InvalidOffset)
        ));
    }

    #[test]
    fn test_read_list_limit() {
        let preset = Preset::minimal();
        let bytes: Vec<u8> = [1u64, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let mut reader = Reader::new(&bytes, &preset);
        assert_eq!(
            reader.read_list::<u64>(2),
            Err(ReaderError::LimitExceeded { count: 3, limit: 2 })
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let preset = Preset::minimal();
        let bytes = [0u8; 9];
        assert_eq!(
            u64::from_bytes(&bytes, &preset),
            Err(ReaderError::InvalidSize)
        );
    }

    #[test]
    fn test_invalid_bool() {
        let preset = Preset::minimal();
        assert_eq!(bool::from_bytes(&[2], &preset), Err(ReaderError::InvalidValue));
    }
}
