// Phase0 beacon helpers needed to pick the block proposer.

use std::sync::Arc;

use beacon_common::{
    config::{Preset, DOMAIN_BEACON_PROPOSER},
    crypto::{hash, Hash, HASH_SIZE},
    state::{BeaconState, Validator},
};
use log::{log_enabled, trace, Level};

use crate::context::ChainContext;

use super::BlockError;

pub fn current_epoch(state: &BeaconState, preset: &Preset) -> u64 {
    state.slot / preset.slots_per_epoch
}

pub fn is_active_validator(validator: &Validator, epoch: u64) -> bool {
    validator.is_active_at(epoch)
}

/// Indices of the validators active at `epoch`, in registry order.
pub fn active_validator_indices(
    ctx: &ChainContext,
    state: &BeaconState,
    epoch: u64,
) -> Arc<Vec<u64>> {
    if let Some(indices) = ctx.cache().active_indices(epoch) {
        return indices;
    }

    let indices: Arc<Vec<u64>> = Arc::new(
        state
            .validators
            .iter()
            .enumerate()
            .filter(|(_, validator)| is_active_validator(validator, epoch))
            .map(|(index, _)| index as u64)
            .collect(),
    );
    ctx.cache().insert_active_indices(epoch, indices.clone());
    indices
}

/// Seed for `epoch` and `domain`, mixed from the randao lookahead.
pub fn get_seed(
    state: &BeaconState,
    epoch: u64,
    domain: [u8; 4],
    preset: &Preset,
) -> Result<Hash, BlockError> {
    let vector_len = preset.epochs_per_historical_vector;
    let mix_index = (epoch + (vector_len - preset.min_seed_lookahead - 1)) % vector_len;
    let mix = state
        .randao_mixes
        .get(mix_index as usize)
        .ok_or(BlockError::MissingRandaoMix(mix_index))?;

    let mut input = Vec::with_capacity(4 + 8 + HASH_SIZE);
    input.extend_from_slice(&domain);
    input.extend_from_slice(&epoch.to_le_bytes());
    input.extend_from_slice(mix.as_bytes());
    Ok(hash(&input))
}

/// Position of `index` after the swap-or-not shuffle of `count` elements.
pub fn compute_shuffled_index(
    index: u64,
    count: u64,
    seed: &Hash,
    preset: &Preset,
) -> Result<u64, BlockError> {
    if index >= count {
        return Err(BlockError::IndexOutOfRange { index, count });
    }

    let mut index = index;
    for round in 0..preset.shuffle_round_count {
        let mut input = Vec::with_capacity(HASH_SIZE + 1 + 4);
        input.extend_from_slice(seed.as_bytes());
        input.push(round);

        let digest = hash(&input);
        let mut pivot_bytes = [0u8; 8];
        pivot_bytes.copy_from_slice(&digest.as_bytes()[..8]);
        let pivot = u64::from_le_bytes(pivot_bytes) % count;

        let flip = (pivot + count - index) % count;
        let position = index.max(flip);
        input.extend_from_slice(&((position / 256) as u32).to_le_bytes());
        let source = hash(&input);
        let byte = source.as_bytes()[((position % 256) / 8) as usize];
        if (byte >> (position % 8)) & 1 == 1 {
            index = flip;
        }
    }

    Ok(index)
}

/// Sample a proposer from `indices`, weighted by effective balance.
pub fn compute_proposer_index(
    state: &BeaconState,
    indices: &[u64],
    seed: &Hash,
    preset: &Preset,
) -> Result<u64, BlockError> {
    let total = indices.len() as u64;
    if total == 0 {
        return Err(BlockError::NoActiveValidators(current_epoch(state, preset)));
    }

    let mut i: u64 = 0;
    loop {
        let shuffled = compute_shuffled_index(i % total, total, seed, preset)?;
        let candidate = indices[shuffled as usize];

        let mut input = Vec::with_capacity(HASH_SIZE + 8);
        input.extend_from_slice(seed.as_bytes());
        input.extend_from_slice(&(i / 32).to_le_bytes());
        let random_byte = hash(&input).as_bytes()[(i % 32) as usize] as u64;

        let effective_balance = state
            .validators
            .get(candidate as usize)
            .ok_or(BlockError::UnknownValidator(candidate))?
            .effective_balance;
        if effective_balance.saturating_mul(255)
            >= preset.max_effective_balance.saturating_mul(random_byte)
        {
            return Ok(candidate);
        }
        i += 1;
    }
}

/// Proposer of the state's current slot.
pub fn get_beacon_proposer_index(
    ctx: &ChainContext,
    state: &BeaconState,
) -> Result<u64, BlockError> {
    let preset = ctx.preset();
    if let Some(index) = ctx.cache().proposer_index(state.slot) {
        trace!("proposer index for slot {} found in cache", state.slot);
        return Ok(index);
    }

    let epoch = current_epoch(state, preset);
    let mut input = Vec::with_capacity(HASH_SIZE + 8);
    input.extend_from_slice(get_seed(state, epoch, DOMAIN_BEACON_PROPOSER, preset)?.as_bytes());
    input.extend_from_slice(&state.slot.to_le_bytes());
    let seed = hash(&input);

    let indices = active_validator_indices(ctx, state, epoch);
    let index = compute_proposer_index(state, &indices, &seed, preset)?;
    if log_enabled!(Level::Trace) {
        trace!(
            "proposer for slot {} is {} out of {} active validators",
            state.slot,
            index,
            indices.len()
        );
    }

    ctx.cache().insert_proposer_index(state.slot, index);
    Ok(index)
}
