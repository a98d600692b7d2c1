use beacon_common::{
    config::Preset,
    crypto::Hash,
    state::{BeaconState, Validator},
};
use beacon_spectest::{compare, ComparisonResult};
use proptest::prelude::*;

fn arb_state() -> impl Strategy<Value = BeaconState> {
    (
        any::<u64>(),
        any::<u64>(),
        prop::collection::vec(any::<u64>(), 0..8),
        prop::array::uniform32(any::<u8>()),
    )
        .prop_map(|(slot, genesis_time, balances, root)| {
            let preset = Preset::minimal();
            let mut state = BeaconState::new(&preset);
            state.slot = slot;
            state.genesis_time = genesis_time;
            state.validators = balances
                .iter()
                .map(|balance| Validator::active_from(0, *balance))
                .collect();
            state.balances = balances;
            state.latest_block_header.parent_root = Hash::new(root);
            state
        })
}

// Field perturbations paired with the path they should be reported at
fn perturb(state: &mut BeaconState, choice: usize) -> String {
    match choice {
        0 => {
            state.slot = state.slot.wrapping_add(1);
            "slot".to_string()
        }
        1 => {
            state.latest_block_header.proposer_index ^= 1;
            "latest_block_header.proposer_index".to_string()
        }
        2 => {
            state.finalized_checkpoint.epoch = state.finalized_checkpoint.epoch.wrapping_add(1);
            "finalized_checkpoint.epoch".to_string()
        }
        3 => {
            state.block_roots[5] = Hash::new([0xab; 32]);
            "block_roots[5]".to_string()
        }
        4 => {
            state.fork.current_version[3] ^= 0xff;
            "fork.current_version".to_string()
        }
        _ => {
            state.genesis_validators_root = Hash::new([0xcd; 32]);
            "genesis_validators_root".to_string()
        }
    }
}

proptest! {
    #[test]
    fn test_compare_is_reflexive(state in arb_state()) {
        prop_assert_eq!(compare(&state, &state.clone()), ComparisonResult::Equal);
    }

    #[test]
    fn test_single_field_perturbation(state in arb_state(), choice in 0usize..6) {
        let mut perturbed = state.clone();
        let path = perturb(&mut perturbed, choice);

        match compare(&perturbed, &state) {
            ComparisonResult::Unequal(diff) => {
                prop_assert_eq!(diff.len(), 1);
                prop_assert_eq!(&diff[0].path, &path);
            }
            ComparisonResult::Equal => prop_assert!(false, "perturbed {} compared equal", path),
        }
    }

    #[test]
    fn test_balance_perturbation(state in arb_state(), index in any::<prop::sample::Index>()) {
        prop_assume!(!state.balances.is_empty());
        let i = index.index(state.balances.len());
        let mut perturbed = state.clone();
        perturbed.balances[i] ^= 1;

        match compare(&perturbed, &state) {
            ComparisonResult::Unequal(diff) => {
                prop_assert_eq!(diff.len(), 1);
                prop_assert_eq!(diff[0].path.clone(), format!("balances[{}]", i));
            }
            ComparisonResult::Equal => prop_assert!(false, "perturbed balance compared equal"),
        }
    }
}
