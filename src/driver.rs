//! Packing driver
//!
//! Repeatedly asks the sorter for containers until the pool is drained or the
//! requested number of sets has been produced.

use crate::container::Container;
use crate::error::PackError;
use crate::sorter::BucketSorter;
use crate::types::{ByteSize, Item, RejectedItem};
use tracing::{debug, info, warn};

/// Parameters of a packing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackPlan {
    /// Capacity of each container in bytes
    pub target_size: u64,
    /// Stop after this many containers; `None` or `Some(0)` means no limit
    pub max_sets: Option<usize>,
}

/// Why the packing loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every item was placed or rejected
    Drained,
    /// The requested number of sets was produced
    SetLimit,
    /// A fit placed nothing while items were still waiting
    Stalled,
}

/// Result of a packing run.
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub target_size: u64,
    pub granularity: u64,
    /// Produced containers, in production order
    pub sets: Vec<Container>,
    /// Items left in the pool
    pub pending: Vec<Item>,
    /// Items removed from the pool without being placed
    pub rejected: Vec<RejectedItem>,
    pub stop_reason: StopReason,
    /// Entries the scan could not read; filled in by the caller
    pub scan_skipped: usize,
}

impl PackSummary {
    pub fn placed_bytes(&self) -> ByteSize {
        self.sets.iter().map(Container::size).sum()
    }

    pub fn placed_items(&self) -> usize {
        self.sets.iter().map(Container::len).sum()
    }

    pub fn pending_bytes(&self) -> ByteSize {
        self.pending.iter().map(|item| item.size).sum()
    }
}

/// Drain `sorter` into containers of `plan.target_size` bytes.
///
/// Items that can never fit are rejected before the first fit, so every fit
/// that runs against a non-empty pool places at least one item.
pub fn pack(sorter: &mut BucketSorter, plan: &PackPlan) -> Result<PackSummary, PackError> {
    if plan.target_size == 0 {
        return Err(PackError::InvalidTarget(plan.target_size));
    }
    let max_sets = plan.max_sets.filter(|&n| n > 0);

    let oversized = sorter.take_oversized(plan.target_size);
    if !oversized.is_empty() {
        warn!(
            count = oversized.len(),
            target = plan.target_size,
            "Items larger than the target size will not be placed"
        );
    }

    let mut sets = Vec::new();
    let mut stop_reason = StopReason::Drained;

    while !sorter.is_empty() {
        if max_sets.is_some_and(|limit| sets.len() >= limit) {
            info!(sets = sets.len(), "Reached requested number of sets");
            stop_reason = StopReason::SetLimit;
            break;
        }

        debug!(buckets = ?sorter.list_buckets_descending(), "Buckets before fit");
        let set = sorter.fit_into(plan.target_size)?;

        if set.is_empty() {
            // Only rejected items were left
            if sorter.is_empty() {
                break;
            }
            warn!(
                pending = sorter.pending_len(),
                "Fit placed nothing, stopping with items left"
            );
            stop_reason = StopReason::Stalled;
            break;
        }

        info!(
            set = sets.len() + 1,
            items = set.len(),
            size = set.size(),
            pending = sorter.pending_len(),
            "Produced set"
        );
        sets.push(set);
    }

    Ok(PackSummary {
        target_size: plan.target_size,
        granularity: sorter.granularity(),
        sets,
        pending: sorter.pending_items().into_iter().cloned().collect(),
        rejected: sorter.rejected().to_vec(),
        stop_reason,
        scan_skipped: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RejectReason;

    fn plan(target_size: u64, max_sets: Option<usize>) -> PackPlan {
        PackPlan {
            target_size,
            max_sets,
        }
    }

    #[test]
    fn test_pack_drains_everything() {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        for (i, size) in [300, 120, 250, 40, 90, 10].into_iter().enumerate() {
            sorter.add(format!("f{i}"), size);
        }

        let summary = pack(&mut sorter, &plan(500, None)).unwrap();
        assert_eq!(summary.stop_reason, StopReason::Drained);
        assert_eq!(summary.placed_bytes(), 810);
        assert_eq!(summary.placed_items(), 6);
        assert!(summary.pending.is_empty());
        assert!(summary.sets.iter().all(|s| s.size() < 500));
    }

    #[test]
    fn test_pack_respects_set_limit() {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        for i in 0..6 {
            sorter.add(format!("f{i}"), 90);
        }

        // Two 90-byte items per 200-byte set
        let summary = pack(&mut sorter, &plan(200, Some(2))).unwrap();
        assert_eq!(summary.stop_reason, StopReason::SetLimit);
        assert_eq!(summary.sets.len(), 2);
        assert_eq!(summary.pending.len(), 2);
        assert_eq!(summary.pending_bytes(), 180);
    }

    #[test]
    fn test_zero_set_limit_means_unlimited() {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        for i in 0..4 {
            sorter.add(format!("f{i}"), 90);
        }
        let summary = pack(&mut sorter, &plan(100, Some(0))).unwrap();
        assert_eq!(summary.sets.len(), 4);
        assert_eq!(summary.stop_reason, StopReason::Drained);
    }

    #[test]
    fn test_oversized_and_negative_items_reported() {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        sorter.add("huge", 1_000);
        sorter.add("bad", -1);
        sorter.add("ok", 50);

        let summary = pack(&mut sorter, &plan(100, None)).unwrap();
        assert_eq!(summary.sets.len(), 1);
        assert_eq!(summary.sets[0].ids().collect::<Vec<_>>(), vec!["ok"]);
        assert!(summary.pending.is_empty());

        let reasons: Vec<_> = summary
            .rejected
            .iter()
            .map(|r| (r.item.id.as_str(), r.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("huge", RejectReason::Oversized),
                ("bad", RejectReason::NegativeSize)
            ]
        );
    }

    #[test]
    fn test_only_negative_items_produce_no_sets() {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        sorter.add("bad", -5);
        let summary = pack(&mut sorter, &plan(100, None)).unwrap();
        assert!(summary.sets.is_empty());
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.stop_reason, StopReason::Drained);
    }

    #[test]
    fn test_zero_target_rejected() {
        let mut sorter = BucketSorter::with_granularity(100).unwrap();
        let err = pack(&mut sorter, &plan(0, None)).unwrap_err();
        assert_eq!(err, PackError::InvalidTarget(0));
    }
}
