use std::collections::HashSet;

use miragekit_audit::classify;
use miragekit_core::models::ChunkRole;
use proptest::prelude::*;

proptest! {
    #[test]
    fn pivot_always_wins(id in "[A-Za-z0-9_-]{1,16}", protect in any::<bool>()) {
        let mut protected = HashSet::new();
        if protect {
            protected.insert(id.clone());
        }
        prop_assert_eq!(classify(&id, &id, &protected), ChunkRole::Pivot);
    }

    #[test]
    fn protected_non_pivot_is_always_predecessor(id in "[A-Za-z0-9_-]{1,16}") {
        let protected: HashSet<String> = [id.clone()].into_iter().collect();
        let pivot = format!("{id}_pivot");
        prop_assert_eq!(classify(&id, &pivot, &protected), ChunkRole::Predecessor);
    }

    #[test]
    fn noise_prefix_is_noise_unless_protected(suffix in "[a-z0-9]{0,8}") {
        let id = format!("n_{suffix}");
        prop_assert_eq!(classify(&id, "PIVOT", &HashSet::new()), ChunkRole::Noise);
    }

    #[test]
    fn classification_is_deterministic(id in ".{0,24}", pivot in ".{0,24}") {
        let protected = HashSet::new();
        prop_assert_eq!(
            classify(&id, &pivot, &protected),
            classify(&id, &pivot, &protected)
        );
    }
}
