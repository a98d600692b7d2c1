use std::fmt::{Display, Error, Formatter};

use beacon_common::{
    block::BeaconBlock, config::Preset, serializer::Serializer, state::BeaconState,
};
use log::{log_enabled, trace, Level};
use snap::raw::Decoder;

use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Block,
    State,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            RecordKind::Block => write!(f, "block"),
            RecordKind::State => write!(f, "state"),
        }
    }
}

/// Decompress a raw snappy block.
pub fn decompress(bytes: &[u8], kind: RecordKind) -> Result<Vec<u8>, DecodeError> {
    let decompressed = Decoder::new()
        .decompress_vec(bytes)
        .map_err(|source| DecodeError::CorruptStream { kind, source })?;

    if log_enabled!(Level::Trace) {
        trace!(
            "{} record decompressed from {} to {} bytes",
            kind,
            bytes.len(),
            decompressed.len()
        );
    }
    Ok(decompressed)
}

/// Decompress and deserialize one record of type `T`.
pub fn decode<T: Serializer>(
    bytes: &[u8],
    kind: RecordKind,
    preset: &Preset,
) -> Result<T, DecodeError> {
    let ssz = decompress(bytes, kind)?;
    T::from_bytes(&ssz, preset).map_err(|source| DecodeError::MalformedRecord { kind, source })
}

pub fn decode_block(bytes: &[u8], preset: &Preset) -> Result<BeaconBlock, DecodeError> {
    decode(bytes, RecordKind::Block, preset)
}

pub fn decode_state(bytes: &[u8], preset: &Preset) -> Result<BeaconState, DecodeError> {
    decode(bytes, RecordKind::State, preset)
}

#[cfg(test)]
mod tests {
    use beacon_common::block::{BeaconBlockBody, BeaconBlockHeader};
    use snap::raw::Encoder;

    use super::*;

    fn compress(bytes: &[u8]) -> Vec<u8> {
        Encoder::new().compress_vec(bytes).unwrap()
    }

    #[test]
    fn test_decode_block() {
        let preset = Preset::minimal();
        let block = BeaconBlock {
            slot: 3,
            body: BeaconBlockBody::default(),
            ..Default::default()
        };
        let bytes = compress(&block.to_bytes());
        assert_eq!(decode_block(&bytes, &preset).unwrap(), block);
    }

    #[test]
    fn test_decode_header_record() {
        let preset = Preset::minimal();
        let block = BeaconBlock {
            slot: 9,
            proposer_index: 4,
            ..Default::default()
        };
        let header = block.to_header(&preset);
        let bytes = compress(&header.to_bytes());
        let decoded: BeaconBlockHeader = decode(&bytes, RecordKind::Block, &preset).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_corrupt_stream() {
        let preset = Preset::minimal();
        // Length header promises 10 bytes, the stream holds a single literal
        let bytes = [0x0au8, 0x00, 0x41];
        assert!(matches!(
            decode_state(&bytes, &preset),
            Err(DecodeError::CorruptStream {
                kind: RecordKind::State,
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_record() {
        let preset = Preset::minimal();
        let bytes = compress(&[1u8, 2, 3]);
        assert!(matches!(
            decode_block(&bytes, &preset),
            Err(DecodeError::MalformedRecord {
                kind: RecordKind::Block,
                ..
            })
        ));
    }
}
