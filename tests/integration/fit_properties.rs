use discfit::{bucket_key, pack, BucketSorter, Container, PackPlan};
use proptest::prelude::*;

fn sizes_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..2_000, 0..60)
}

proptest! {
    #[test]
    fn container_size_tracks_accepted_adds(sizes in sizes_strategy(), max_size in 0u64..5_000) {
        let mut set = Container::new(max_size);
        let mut expected = 0i64;
        for (i, size) in sizes.iter().enumerate() {
            let before = set.size();
            match set.add(format!("f{i}"), *size) {
                Ok(()) => expected += size,
                Err(_) => prop_assert_eq!(set.size(), before),
            }
            prop_assert_eq!(set.size(), expected);
            prop_assert!(set.size() as u64 <= max_size);
        }
    }

    #[test]
    fn bucket_keys_bound_their_items(size in 0i64..1_000_000, granularity in 1u64..10_000) {
        let key = bucket_key(size, granularity);
        prop_assert_eq!(key % granularity, 0);
        prop_assert!(key <= size as u64);
        prop_assert!((size as u64) < key + granularity);
    }

    #[test]
    fn buckets_listed_strictly_descending(sizes in sizes_strategy(), granularity in 1u64..500) {
        let mut sorter = BucketSorter::with_granularity(granularity).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            sorter.add(format!("f{i}"), *size);
        }
        let keys = sorter.list_buckets_descending();
        prop_assert!(keys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn fit_never_exceeds_target(sizes in sizes_strategy(), target in 1u64..5_000) {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            sorter.add(format!("f{i}"), *size);
        }
        let set = sorter.fit_into(target).unwrap();
        prop_assert!((set.size() as u64) < target || set.is_empty());
        prop_assert_eq!(sorter.last_total(), set.size());
    }

    #[test]
    fn repeated_fits_conserve_total_size(sizes in sizes_strategy(), target in 1u64..5_000) {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            sorter.add(format!("f{i}"), *size);
        }

        let summary = pack(&mut sorter, &PackPlan { target_size: target, max_sets: None }).unwrap();

        let placeable: i64 = sizes.iter().filter(|&&s| (s as u64) < target).sum();
        let rejected: i64 = summary.rejected.iter().map(|r| r.item.size).sum();
        prop_assert_eq!(summary.placed_bytes(), placeable);
        prop_assert_eq!(summary.placed_bytes() + rejected, sizes.iter().sum::<i64>());
        prop_assert!(summary.pending.is_empty());
        prop_assert!(sorter.is_empty());
        prop_assert!(summary.sets.iter().all(|s| !s.is_empty()));
    }
}
