use beacon_common::{
    block::{BeaconBlock, BeaconBlockHeader},
    crypto::Hash,
    merkle::TreeHash,
    state::BeaconState,
};
use log::{debug, trace};

use crate::context::ChainContext;

use super::{helpers::get_beacon_proposer_index, BlockError};

/// Apply the header of `block` to `state`.
///
/// Signatures are not verified here.
pub fn process_block_header(
    ctx: &ChainContext,
    state: BeaconState,
    block: &BeaconBlock,
) -> Result<BeaconState, BlockError> {
    let body_root = block.body.tree_hash_root(ctx.preset());
    process_block_header_no_verify(
        ctx,
        state,
        block.slot,
        block.proposer_index,
        &block.parent_root,
        body_root,
    )
}

/// Validate a block header against `state` and record it as the latest
/// header, without any signature check.
///
/// The recorded header has a zero state root; it is filled in when the
/// next slot is processed.
pub fn process_block_header_no_verify(
    ctx: &ChainContext,
    mut state: BeaconState,
    slot: u64,
    proposer_index: u64,
    parent_root: &Hash,
    body_root: Hash,
) -> Result<BeaconState, BlockError> {
    if slot != state.slot {
        debug!("Block slot {} does not match state slot {}", slot, state.slot);
        return Err(BlockError::SlotMismatch {
            block: slot,
            state: state.slot,
        });
    }

    let latest_slot = state.latest_block_header.slot;
    if slot <= latest_slot {
        return Err(BlockError::SlotNotNewer {
            block: slot,
            latest: latest_slot,
        });
    }

    let expected_proposer = get_beacon_proposer_index(ctx, &state)?;
    if proposer_index != expected_proposer {
        debug!(
            "Block proposer {} is not the expected proposer {} for slot {}",
            proposer_index, expected_proposer, slot
        );
        return Err(BlockError::ProposerMismatch {
            block: proposer_index,
            expected: expected_proposer,
        });
    }

    let expected_parent = state.latest_block_header.tree_hash_root(ctx.preset());
    if *parent_root != expected_parent {
        return Err(BlockError::ParentRootMismatch {
            block: parent_root.clone(),
            expected: expected_parent,
        });
    }

    state.latest_block_header = BeaconBlockHeader {
        slot,
        proposer_index,
        parent_root: parent_root.clone(),
        state_root: Hash::zero(),
        body_root,
    };

    let proposer = state
        .validators
        .get(proposer_index as usize)
        .ok_or(BlockError::UnknownValidator(proposer_index))?;
    if proposer.slashed {
        return Err(BlockError::ProposerSlashed(proposer_index));
    }

    trace!("Processed block header {}", state.latest_block_header);
    Ok(state)
}
