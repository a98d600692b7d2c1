mod common;

use std::{fs, sync::Arc};

use beacon_chain::{ChainContext, HelperCache};
use beacon_common::{block::BeaconBlock, config::Preset, crypto::Hash, state::BeaconState};
use beacon_spectest::{
    fixtures::{FixtureStore, BLOCK_FILE, POST_STATE_FILE},
    DiscoveryError, SpecRunner, TestStatus, Transition, TransitionError,
};

use common::*;

// Accepts every block and leaves the state untouched
struct ForcedSuccess;

impl Transition for ForcedSuccess {
    fn apply(
        &self,
        _: &ChainContext,
        pre: BeaconState,
        _: &BeaconBlock,
    ) -> Result<BeaconState, TransitionError> {
        Ok(pre)
    }
}

#[test]
fn test_matching_triple_passes() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    write_valid_case(dir.path(), "valid", &preset, &[true, true, true, true]);

    let report = SpecRunner::new(config).run().unwrap();
    assert_eq!(report.total, 1);
    assert!(report.all_passed());
    let result = report.get("valid").unwrap();
    assert_eq!(result.status, TestStatus::Pass);
    assert!(result.diff.is_empty());
}

#[test]
fn test_invalid_slot_without_post_passes() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    write_invalid_slot_case(dir.path(), "invalid_slot", &preset);

    let report = SpecRunner::new(config).run().unwrap();
    assert_eq!(report.get("invalid_slot").unwrap().status, TestStatus::Pass);
}

#[test]
fn test_forced_success_without_post_fails() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    write_invalid_slot_case(dir.path(), "invalid_slot", &preset);

    let report = SpecRunner::with_transition(config, Arc::new(ForcedSuccess))
        .run()
        .unwrap();
    let result = report.get("invalid_slot").unwrap();
    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(result.error.as_deref(), Some("Did not fail when expected"));
}

#[test]
fn test_unreadable_post_is_not_expected_failure() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    let case = write_invalid_slot_case(dir.path(), "unreadable_post", &preset);
    // Exists, but reading it as a file fails
    fs::create_dir(case.join(POST_STATE_FILE)).unwrap();

    let report = SpecRunner::new(config).run().unwrap();
    let result = report.get("unreadable_post").unwrap();
    assert_eq!(result.status, TestStatus::Fail);
    assert!(result.error.as_deref().unwrap().starts_with("Cannot read"));
}

#[test]
fn test_mismatched_post_reports_diff() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    let pre = pre_state(&preset, &[true, true, true, true]);
    let block = valid_block(&preset, &pre);
    let mut post = expected_post(&preset, &pre, &block);
    post.latest_block_header.body_root = Hash::new([0xee; 32]);
    write_case(dir.path(), "mismatch", &block, &pre, Some(&post));

    let report = SpecRunner::new(config).run().unwrap();
    let result = report.get("mismatch").unwrap();
    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(result.diff.len(), 1);
    assert_eq!(result.diff[0].path, "latest_block_header.body_root");
}

#[test]
fn test_transition_error_with_post_fails() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    let pre = pre_state(&preset, &[true, true, true, true]);
    let mut block = valid_block(&preset, &pre);
    let post = expected_post(&preset, &pre, &block);
    block.parent_root = Hash::new([0x99; 32]);
    write_case(dir.path(), "bad_parent", &block, &pre, Some(&post));

    let report = SpecRunner::new(config).run().unwrap();
    let result = report.get("bad_parent").unwrap();
    assert_eq!(result.status, TestStatus::Fail);
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .starts_with("Transition failed: Invalid parent root"));
}

#[test]
fn test_corrupt_block_fails_case_only() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    let case = write_invalid_slot_case(dir.path(), "a_corrupt", &preset);
    fs::write(case.join(BLOCK_FILE), [0x0au8, 0x00, 0x41]).unwrap();
    write_valid_case(dir.path(), "b_valid", &preset, &[true, true]);

    let report = SpecRunner::new(config).run().unwrap();
    assert_eq!(report.total, 2);
    let corrupt = report.get("a_corrupt").unwrap();
    assert_eq!(corrupt.status, TestStatus::Fail);
    assert!(corrupt
        .error
        .as_deref()
        .unwrap()
        .starts_with("Corrupt snappy stream for block"));
    assert_eq!(report.get("b_valid").unwrap().status, TestStatus::Pass);
}

#[test]
fn test_missing_block_is_fatal_for_case() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();
    let case = write_invalid_slot_case(dir.path(), "no_block", &preset);
    fs::remove_file(case.join(BLOCK_FILE)).unwrap();

    let report = SpecRunner::new(config).run().unwrap();
    let result = report.get("no_block").unwrap();
    assert_eq!(result.status, TestStatus::Fail);
    assert!(result.error.as_deref().unwrap().contains("does not exist"));
}

#[test]
fn test_empty_category_aborts_run() {
    let (dir, config) = fixture_root();
    let store = FixtureStore::new(dir.path());
    fs::create_dir_all(store.category_path(config.config, CATEGORY)).unwrap();

    assert!(matches!(
        SpecRunner::new(config).run(),
        Err(DiscoveryError::Empty(_))
    ));
}

#[test]
fn test_missing_category_aborts_run() {
    let (_dir, config) = fixture_root();
    assert!(matches!(
        SpecRunner::new(config).run(),
        Err(DiscoveryError::NotFound(_))
    ));
}

// Case "b" only has a validator active that "a" did not pick, at the same
// slot. Leftover proposer or active index entries from "a" would make it fail.
#[test]
fn test_shared_cache_is_reset_between_cases() {
    let preset = Preset::minimal();
    let (dir, config) = fixture_root();

    let first = pre_state(&preset, &[true, true, true, true]);
    let proposer = proposer_of(&preset, &first);
    let mut active = [false; 4];
    active[((proposer + 1) % 4) as usize] = true;

    write_valid_case(dir.path(), "a_all_active", &preset, &[true, true, true, true]);
    write_valid_case(dir.path(), "b_single_active", &preset, &active);

    let runner = SpecRunner::new(config);
    let cases = runner.discover().unwrap();
    let cache = Arc::new(HelperCache::default());
    let case_runner = runner.case_runner_with(cache.clone());

    let first_run = runner.run_cases(&case_runner, &cases);
    let second_run = runner.run_cases(&case_runner, &cases);
    assert!(first_run.all_passed(), "{:?}", first_run.results);
    assert!(second_run.all_passed(), "{:?}", second_run.results);
    assert!(!cache.is_empty());
}

#[test]
fn test_parallel_matches_sequential() {
    let preset = Preset::minimal();
    let (dir, mut config) = fixture_root();
    for i in 0..6 {
        write_valid_case(dir.path(), &format!("valid_{}", i), &preset, &[true; 5]);
        write_invalid_slot_case(dir.path(), &format!("invalid_{}", i), &preset);
    }

    let sequential = SpecRunner::new(config.clone()).run().unwrap();
    config.workers = 3;
    let parallel = SpecRunner::new(config).run().unwrap();

    assert_eq!(parallel.total, 12);
    assert!(parallel.all_passed());
    let names = |report: &beacon_spectest::RunReport| -> Vec<String> {
        report.results.iter().map(|r| r.name.clone()).collect()
    };
    assert_eq!(names(&parallel), names(&sequential));
    let mut sorted = names(&parallel);
    sorted.sort();
    assert_eq!(names(&parallel), sorted);
}

#[test]
fn test_name_filter() {
    let preset = Preset::minimal();
    let (dir, mut config) = fixture_root();
    write_valid_case(dir.path(), "valid_case", &preset, &[true, true]);
    write_invalid_slot_case(dir.path(), "invalid_slot", &preset);
    config.filter = Some("slot".to_string());

    let report = SpecRunner::new(config).run().unwrap();
    assert_eq!(report.total, 1);
    assert!(report.get("invalid_slot").is_some());
}
