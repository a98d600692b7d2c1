use beacon_chain::{process_block_header_no_verify, ChainContext};
use beacon_common::{block::BeaconBlock, merkle::TreeHash, state::BeaconState};
use log::debug;

use crate::error::TransitionError;

/// State transition exercised by the runner.
pub trait Transition: Send + Sync {
    fn apply(
        &self,
        ctx: &ChainContext,
        pre: BeaconState,
        block: &BeaconBlock,
    ) -> Result<BeaconState, TransitionError>;
}

/// Phase0 block header processing.
///
/// Fixture blocks are unsigned, so the signature check is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockHeaderTransition;

impl Transition for BlockHeaderTransition {
    fn apply(
        &self,
        ctx: &ChainContext,
        pre: BeaconState,
        block: &BeaconBlock,
    ) -> Result<BeaconState, TransitionError> {
        let body_root = block.body.tree_hash_root(ctx.preset());
        process_block_header_no_verify(
            ctx,
            pre,
            block.slot,
            block.proposer_index,
            &block.parent_root,
            body_root,
        )
        .map_err(|e| {
            debug!("Block header transition failed: {:?}", e);
            TransitionError::new(e)
        })
    }
}
