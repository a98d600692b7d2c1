// BLS keys and signatures are carried as opaque bytes: the block-header
// transition never verifies them.

use std::fmt::{Debug, Display, Error, Formatter};

use crate::{
    config::Preset,
    merkle::{merkleize, pack_bytes, TreeHash},
    serializer::{Reader, ReaderError, Serializer, Writer},
};

use super::Hash;

pub const BLS_PUBLIC_KEY_SIZE: usize = 48;
pub const BLS_SIGNATURE_SIZE: usize = 96;

macro_rules! opaque_bytes {
    ($name: ident, $size: expr) => {
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name([u8; $size]);

        impl $name {
            pub const fn new(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            pub const fn zero() -> Self {
                Self([0; $size])
            }

            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl Serializer for $name {
            const FIXED: bool = true;

            fn fixed_size(_: &Preset) -> usize {
                $size
            }

            fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
                Ok(Self(reader.read_array::<$size>()?))
            }

            fn write(&self, writer: &mut Writer) {
                writer.write_bytes(&self.0);
            }
        }

        impl TreeHash for $name {
            fn tree_hash_root(&self, _: &Preset) -> Hash {
                let chunks = pack_bytes(&self.0);
                let limit = chunks.len() as u64;
                merkleize(chunks, limit)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
                write!(f, "0x{}", self.to_hex())
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
                write!(f, "{}(0x{})", stringify!($name), self.to_hex())
            }
        }
    };
}

opaque_bytes!(BlsPublicKey, BLS_PUBLIC_KEY_SIZE);
opaque_bytes!(BlsSignature, BLS_SIGNATURE_SIZE);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash_pair;

    #[test]
    fn test_public_key_root_is_two_chunk_tree() {
        let key = BlsPublicKey::new([7u8; BLS_PUBLIC_KEY_SIZE]);
        let mut second = [0u8; 32];
        second[..16].copy_from_slice(&[7u8; 16]);
        let expected = hash_pair(&Hash::new([7u8; 32]), &Hash::new(second));
        assert_eq!(key.tree_hash_root(&Preset::minimal()), expected);
    }

    #[test]
    fn test_signature_serializer_size() {
        let signature = BlsSignature::new([1u8; BLS_SIGNATURE_SIZE]);
        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), BLS_SIGNATURE_SIZE);
        let back = BlsSignature::from_bytes(&bytes, &Preset::minimal()).unwrap();
        assert_eq!(back, signature);
    }
}
