//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use beacon_chain::{core::helpers::get_beacon_proposer_index, ChainContext};
use beacon_common::{
    block::{BeaconBlock, BeaconBlockBody, BeaconBlockHeader},
    config::{ConfigName, Preset},
    crypto::Hash,
    merkle::TreeHash,
    serializer::Serializer,
    state::{BeaconState, Validator},
};
use beacon_spectest::{
    fixtures::{FixtureStore, BLOCK_FILE, POST_STATE_FILE, PRE_STATE_FILE},
    RunnerConfig,
};
use snap::raw::Encoder;
use tempfile::TempDir;

pub const CATEGORY: &str = "block_header";
pub const SLOT: u64 = 10;

pub fn compress(bytes: &[u8]) -> Vec<u8> {
    Encoder::new().compress_vec(bytes).unwrap()
}

/// Fixture root with the runner configuration pointing at it.
pub fn fixture_root() -> (TempDir, RunnerConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = RunnerConfig::new(dir.path(), ConfigName::Minimal);
    (dir, config)
}

pub fn case_dir(root: &Path, name: &str) -> PathBuf {
    let path = FixtureStore::new(root)
        .category_path(ConfigName::Minimal, CATEGORY)
        .join(name);
    fs::create_dir_all(&path).unwrap();
    path
}

pub fn write_case(
    root: &Path,
    name: &str,
    block: &BeaconBlock,
    pre: &BeaconState,
    post: Option<&BeaconState>,
) -> PathBuf {
    let dir = case_dir(root, name);
    fs::write(dir.join(BLOCK_FILE), compress(&block.to_bytes())).unwrap();
    fs::write(dir.join(PRE_STATE_FILE), compress(&pre.to_bytes())).unwrap();
    if let Some(post) = post {
        fs::write(dir.join(POST_STATE_FILE), compress(&post.to_bytes())).unwrap();
    }
    dir
}

/// State at `SLOT` whose registry has one validator per entry of `active`.
pub fn pre_state(preset: &Preset, active: &[bool]) -> BeaconState {
    let mut state = BeaconState::new(preset);
    state.slot = SLOT;
    state.latest_block_header = BeaconBlockHeader {
        slot: SLOT - 1,
        proposer_index: 0,
        parent_root: Hash::new([0x11; 32]),
        state_root: Hash::new([0x22; 32]),
        body_root: Hash::new([0x33; 32]),
    };
    state.validators = active
        .iter()
        .map(|active| {
            let mut validator = Validator::active_from(0, preset.max_effective_balance);
            if !active {
                validator.exit_epoch = 0;
            }
            validator
        })
        .collect();
    state.balances = vec![preset.max_effective_balance; active.len()];
    state
}

pub fn proposer_of(preset: &Preset, state: &BeaconState) -> u64 {
    let ctx = ChainContext::new(preset.clone());
    get_beacon_proposer_index(&ctx, state).unwrap()
}

/// Block that the header transition accepts on top of `pre`.
pub fn valid_block(preset: &Preset, pre: &BeaconState) -> BeaconBlock {
    BeaconBlock {
        slot: pre.slot,
        proposer_index: proposer_of(preset, pre),
        parent_root: pre.latest_block_header.tree_hash_root(preset),
        state_root: Hash::new([0x44; 32]),
        body: BeaconBlockBody {
            graffiti: Hash::new([0x55; 32]),
            ..Default::default()
        },
    }
}

/// Post state expected after applying `block` to `pre`.
pub fn expected_post(preset: &Preset, pre: &BeaconState, block: &BeaconBlock) -> BeaconState {
    let mut post = pre.clone();
    post.latest_block_header = BeaconBlockHeader {
        slot: block.slot,
        proposer_index: block.proposer_index,
        parent_root: block.parent_root.clone(),
        state_root: Hash::zero(),
        body_root: block.body.tree_hash_root(preset),
    };
    post
}

/// Valid case with its expected post state.
pub fn write_valid_case(root: &Path, name: &str, preset: &Preset, active: &[bool]) -> PathBuf {
    let pre = pre_state(preset, active);
    let block = valid_block(preset, &pre);
    let post = expected_post(preset, &pre, &block);
    write_case(root, name, &block, &pre, Some(&post))
}

/// Case whose block slot does not match the state, without a post state.
pub fn write_invalid_slot_case(root: &Path, name: &str, preset: &Preset) -> PathBuf {
    let pre = pre_state(preset, &[true, true, true, true]);
    let mut block = valid_block(preset, &pre);
    block.slot = pre.slot + 1;
    write_case(root, name, &block, &pre, None)
}
