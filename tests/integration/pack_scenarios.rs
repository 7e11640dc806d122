use discfit::{pack, BucketSorter, Container, PackError, PackPlan, SorterConfig, StopReason};

fn ids(set: &Container) -> Vec<&str> {
    set.ids().collect()
}

#[test]
fn container_rejects_overflow_and_keeps_state() {
    let mut set = Container::new(100);
    set.add("a", 60).unwrap();

    let err = set.add("b", 50).unwrap_err();
    assert!(matches!(
        err,
        PackError::CapacityExceeded {
            attempted: 110,
            max_size: 100
        }
    ));
    assert_eq!(set.size(), 60);
    assert_eq!(ids(&set), vec!["a"]);
}

#[test]
fn three_ninety_byte_files_into_240() {
    let mut sorter = BucketSorter::with_granularity(100).unwrap();
    sorter.add("a", 90);
    sorter.add("b", 90);
    sorter.add("c", 90);
    assert_eq!(sorter.list_buckets_descending(), vec![0]);

    let set = sorter.fit_into(240).unwrap();
    assert_eq!(ids(&set), vec!["a", "b"]);
    assert_eq!(set.size(), 180);
    assert_eq!(sorter.pending_len(), 1);
    assert!(!sorter.is_empty());
}

#[test]
fn exact_target_item_is_left_in_pool_under_strict_fit() {
    let mut sorter = BucketSorter::with_granularity(100).unwrap();
    sorter.add("exact", 100);

    let set = sorter.fit_into(100).unwrap();
    assert!(set.is_empty());
    assert!(!sorter.is_empty());
}

#[test]
fn exact_target_item_is_rejected_by_driver_under_strict_fit() {
    let mut sorter = BucketSorter::with_granularity(100).unwrap();
    sorter.add("exact", 100);
    sorter.add("small", 10);

    let summary = pack(
        &mut sorter,
        &PackPlan {
            target_size: 100,
            max_sets: None,
        },
    )
    .unwrap();
    assert_eq!(summary.sets.len(), 1);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].item.id, "exact");
    assert_eq!(summary.stop_reason, StopReason::Drained);
}

#[test]
fn exact_fit_policy_places_target_sized_item() {
    let config = SorterConfig {
        granularity: 100,
        allow_exact_fit: true,
        ..SorterConfig::default()
    };
    let mut sorter = BucketSorter::new(&config).unwrap();
    sorter.add("exact", 100);

    let summary = pack(
        &mut sorter,
        &PackPlan {
            target_size: 100,
            max_sets: None,
        },
    )
    .unwrap();
    assert_eq!(summary.sets.len(), 1);
    assert_eq!(summary.sets[0].size(), 100);
    assert!(summary.rejected.is_empty());
}

#[test]
fn dvd_sized_run_with_default_buckets() {
    let gib: i64 = 1024 * 1024 * 1024;
    let mib: i64 = 1024 * 1024;
    let mut sorter = BucketSorter::new(&SorterConfig::default()).unwrap();
    sorter.add("movie1.mkv", 3 * gib);
    sorter.add("movie2.mkv", 2 * gib);
    sorter.add("movie3.mkv", 2 * gib + 300 * mib);
    sorter.add("extras.zip", 900 * mib);
    sorter.add("notes.txt", 4096);

    let summary = pack(
        &mut sorter,
        &PackPlan {
            target_size: discfit::types::SINGLE_LAYER_DVD_BYTES,
            max_sets: None,
        },
    )
    .unwrap();

    assert_eq!(summary.sets.len(), 2);
    assert_eq!(ids(&summary.sets[0]), vec!["movie1.mkv", "extras.zip", "notes.txt"]);
    assert_eq!(ids(&summary.sets[1]), vec!["movie3.mkv", "movie2.mkv"]);
    assert!(summary
        .sets
        .iter()
        .all(|s| (s.size() as u64) < discfit::types::SINGLE_LAYER_DVD_BYTES));
}
