use beacon_chain::core::helpers::compute_shuffled_index;
use beacon_common::{config::Preset, crypto::Hash};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_shuffled_index_stays_in_range(
        seed in prop::array::uniform32(any::<u8>()),
        count in 1u64..10_000,
        index in any::<u64>(),
    ) {
        let preset = Preset::minimal();
        let index = index % count;
        let shuffled = compute_shuffled_index(index, count, &Hash::new(seed), &preset).unwrap();
        prop_assert!(shuffled < count);
    }

    #[test]
    fn test_shuffle_is_deterministic(
        seed in prop::array::uniform32(any::<u8>()),
        index in 0u64..64,
    ) {
        let preset = Preset::mainnet();
        let seed = Hash::new(seed);
        prop_assert_eq!(
            compute_shuffled_index(index, 64, &seed, &preset),
            compute_shuffled_index(index, 64, &seed, &preset)
        );
    }
}
