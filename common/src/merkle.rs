// SSZ merkleization
//
// Leaves are 32-byte chunks. A tree is always padded up to the next power
// of two of its limit with precomputed zero subtrees, so a list's root only
// depends on its content and its type limit, never on its capacity.

use crate::{
    config::Preset,
    crypto::{hash_pair, Hash, HASH_SIZE},
};

pub const BYTES_PER_CHUNK: usize = HASH_SIZE;

pub trait TreeHash {
    fn tree_hash_root(&self, preset: &Preset) -> Hash;
}

// Depth of a tree holding `limit` leaves
fn tree_depth(limit: u64) -> usize {
    if limit <= 1 {
        0
    } else {
        (64 - (limit - 1).leading_zeros()) as usize
    }
}

// Roots of all-zero subtrees, indexed by height
fn zero_hashes(depth: usize) -> Vec<Hash> {
    let mut hashes = Vec::with_capacity(depth + 1);
    hashes.push(Hash::zero());
    for i in 0..depth {
        let next = hash_pair(&hashes[i], &hashes[i]);
        hashes.push(next);
    }
    hashes
}

/// Merkle root of `chunks` padded to a tree sized for `limit` leaves.
pub fn merkleize(chunks: Vec<Hash>, limit: u64) -> Hash {
    debug_assert!(
        chunks.len() as u64 <= limit.max(1),
        "{} chunks exceed limit {}",
        chunks.len(),
        limit
    );

    let depth = tree_depth(limit.max(chunks.len() as u64));
    let zeros = zero_hashes(depth);
    if chunks.is_empty() {
        return zeros[depth].clone();
    }

    let mut layer = chunks;
    for zero in zeros.iter().take(depth) {
        if layer.len() % 2 == 1 {
            layer.push(zero.clone());
        }
        layer = layer
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    layer.swap_remove(0)
}

/// Mix the element count of a list into its content root.
pub fn mix_in_length(root: &Hash, length: u64) -> Hash {
    let mut bytes = [0u8; BYTES_PER_CHUNK];
    bytes[..8].copy_from_slice(&length.to_le_bytes());
    hash_pair(root, &Hash::new(bytes))
}

/// Split bytes into zero-padded chunks.
pub fn pack_bytes(bytes: &[u8]) -> Vec<Hash> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|chunk| {
            let mut bytes = [0u8; BYTES_PER_CHUNK];
            bytes[..chunk.len()].copy_from_slice(chunk);
            Hash::new(bytes)
        })
        .collect()
}

pub fn pack_u64s(values: &[u64]) -> Vec<Hash> {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    pack_bytes(&bytes)
}

// Number of chunks needed for `count` packed u64 values
fn u64_chunk_count(count: u64) -> u64 {
    (count * 8).div_ceil(BYTES_PER_CHUNK as u64)
}

/// Root of a container from the roots of its fields, in order.
pub fn container_root(field_roots: Vec<Hash>) -> Hash {
    let limit = field_roots.len() as u64;
    merkleize(field_roots, limit)
}

pub fn vector_root<T: TreeHash>(items: &[T], preset: &Preset) -> Hash {
    let roots: Vec<Hash> = items.iter().map(|i| i.tree_hash_root(preset)).collect();
    let limit = roots.len() as u64;
    merkleize(roots, limit)
}

pub fn list_root<T: TreeHash>(items: &[T], limit: u64, preset: &Preset) -> Hash {
    let roots: Vec<Hash> = items.iter().map(|i| i.tree_hash_root(preset)).collect();
    mix_in_length(&merkleize(roots, limit), items.len() as u64)
}

pub fn u64_vector_root(values: &[u64]) -> Hash {
    merkleize(pack_u64s(values), u64_chunk_count(values.len() as u64))
}

pub fn u64_list_root(values: &[u64], limit: u64) -> Hash {
    let root = merkleize(pack_u64s(values), u64_chunk_count(limit));
    mix_in_length(&root, values.len() as u64)
}

impl TreeHash for u64 {
    fn tree_hash_root(&self, _: &Preset) -> Hash {
        let mut bytes = [0u8; BYTES_PER_CHUNK];
        bytes[..8].copy_from_slice(&self.to_le_bytes());
        Hash::new(bytes)
    }
}

impl TreeHash for bool {
    fn tree_hash_root(&self, _: &Preset) -> Hash {
        let mut bytes = [0u8; BYTES_PER_CHUNK];
        bytes[0] = u8::from(*self);
        Hash::new(bytes)
    }
}

impl TreeHash for Hash {
    fn tree_hash_root(&self, _: &Preset) -> Hash {
        self.clone()
    }
}

impl<const N: usize> TreeHash for [u8; N] {
    fn tree_hash_root(&self, _: &Preset) -> Hash {
        let chunks = pack_bytes(self);
        let limit = chunks.len() as u64;
        merkleize(chunks, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash;

    #[test]
    fn test_tree_depth() {
        assert_eq!(tree_depth(0), 0);
        assert_eq!(tree_depth(1), 0);
        assert_eq!(tree_depth(2), 1);
        assert_eq!(tree_depth(3), 2);
        assert_eq!(tree_depth(4), 2);
        assert_eq!(tree_depth(5), 3);
        assert_eq!(tree_depth(1 << 40), 40);
    }

    #[test]
    fn test_single_chunk_is_its_own_root() {
        let chunk = Hash::new([9u8; 32]);
        assert_eq!(merkleize(vec![chunk.clone()], 1), chunk);
    }

    #[test]
    fn test_padding_with_zero_subtrees() {
        let a = Hash::new([1u8; 32]);
        let b = Hash::new([2u8; 32]);
        let c = Hash::new([3u8; 32]);

        let left = hash_pair(&a, &b);
        let right = hash_pair(&c, &Hash::zero());
        assert_eq!(merkleize(vec![a, b, c], 4), hash_pair(&left, &right));
    }

    #[test]
    fn test_empty_list_root() {
        // An empty list with a limit of 4 chunks is the zero tree of depth 2
        let zero1 = hash_pair(&Hash::zero(), &Hash::zero());
        let zero2 = hash_pair(&zero1, &zero1);
        assert_eq!(merkleize(Vec::new(), 4), zero2);

        let root = u64_list_root(&[], 16);
        assert_eq!(root, mix_in_length(&zero2, 0));
    }

    #[test]
    fn test_large_limit_does_not_allocate_leaves() {
        // Validator registry sized limit
        let root = merkleize(vec![Hash::new([1u8; 32])], 1 << 40);
        assert_ne!(root, Hash::zero());
    }

    #[test]
    fn test_mix_in_length() {
        let root = Hash::new([5u8; 32]);
        let mut length = [0u8; 32];
        length[0] = 3;
        let expected = hash(&[*root.as_bytes(), length].concat());
        assert_eq!(mix_in_length(&root, 3), expected);
    }

    #[test]
    fn test_u64_packing() {
        let chunks = pack_u64s(&[1, 2, 3, 4, 5]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].as_bytes()[0], 5);
    }
}
