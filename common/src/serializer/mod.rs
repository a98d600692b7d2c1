// SSZ serializer
//
// Values implement `Serializer` and are encoded with `Writer` / decoded with
// `Reader`. Fixed-size values are written inline; variable-size values in a
// container are referenced by a 4-byte little-endian offset in the fixed part
// and their bytes are appended after it, in field order.

mod defaults;
mod reader;
mod writer;

pub use reader::{fixed_part_size, Field, Fields, Reader, ReaderError};
pub use writer::{ContainerWriter, Writer};

use crate::config::Preset;

// Size of an offset in the fixed part of a container or list
pub const OFFSET_SIZE: usize = 4;

pub trait Serializer: Sized {
    // Every value of the type encodes to the same length
    const FIXED: bool;

    /// Length this type occupies in the fixed part of a container.
    ///
    /// This is the full encoded length for fixed-size types and the offset
    /// size for variable-size types. Vector lengths depend on the preset.
    fn fixed_size(preset: &Preset) -> usize;

    fn write(&self, writer: &mut Writer);

    /// Decode a value that spans every remaining byte of the reader.
    fn read(reader: &mut Reader) -> Result<Self, ReaderError>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        self.write(&mut writer);
        writer.bytes()
    }

    fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    fn from_bytes(bytes: &[u8], preset: &Preset) -> Result<Self, ReaderError> {
        let mut reader = Reader::new(bytes, preset);
        let value = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }

    fn from_hex(hex: &str, preset: &Preset) -> Result<Self, ReaderError> {
        let bytes = hex::decode(hex).map_err(|_| ReaderError::InvalidHex)?;
        Self::from_bytes(&bytes, preset)
    }
}
