use crate::config::Preset;

use super::{Reader, ReaderError, Serializer, Writer, OFFSET_SIZE};

impl Serializer for u8 {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        1
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u8()
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u8(*self);
    }
}

impl Serializer for u64 {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        8
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u64()
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self);
    }
}

impl Serializer for bool {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        1
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_bool()
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_bool(*self);
    }
}

// Short byte vectors such as fork versions
impl<const N: usize> Serializer for [u8; N] {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        N
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_array::<N>()
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_bytes(self);
    }
}

// Unbounded list; containers use `Fields::next_list` to apply their limits
impl<T: Serializer> Serializer for Vec<T> {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_list(u64::MAX)
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_list(self);
    }
}
