//! Bucket Sorter
//!
//! Groups unplaced items into coarse size buckets and drains them into
//! containers with a greedy largest-first pass. Items whose sizes fall within
//! one granularity unit of each other are treated as interchangeable for
//! placement order, so items inside a bucket keep their insertion order.

use crate::container::Container;
use crate::error::PackError;
use crate::types::{BucketKey, ByteSize, Item, RejectReason, RejectedItem, DEFAULT_GRANULARITY};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sorter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorterConfig {
    /// Bucket width in bytes (default: 100 MiB)
    #[serde(default = "default_granularity")]
    pub granularity: u64,

    /// Pause between items and between buckets during a fit, in milliseconds.
    /// Zero disables pacing.
    #[serde(default)]
    pub pace_ms: u64,

    /// Accept an item that brings a container exactly to its target.
    ///
    /// Off by default: the fit check is `running + size < target`.
    #[serde(default)]
    pub allow_exact_fit: bool,
}

fn default_granularity() -> u64 {
    DEFAULT_GRANULARITY
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            granularity: default_granularity(),
            pace_ms: 0,
            allow_exact_fit: false,
        }
    }
}

/// Compute the bucket an item of `size` belongs to.
///
/// Rounds the size down to a multiple of `granularity`; negative sizes land in
/// bucket 0.
pub fn bucket_key(size: ByteSize, granularity: u64) -> BucketKey {
    match u64::try_from(size) {
        Ok(size) => size - (size % granularity),
        Err(_) => 0,
    }
}

/// Bucket sorter over a pool of unplaced items.
pub struct BucketSorter {
    granularity: u64,
    pace: Duration,
    allow_exact_fit: bool,
    /// Pool: bucket key -> items in insertion order. Never holds empty buckets.
    buckets: BTreeMap<BucketKey, VecDeque<Item>>,
    /// Containers produced so far
    history: Vec<Container>,
    /// Running total of the last fit
    last_total: ByteSize,
    /// Items taken out of the pool without being placed
    rejected: Vec<RejectedItem>,
}

impl BucketSorter {
    /// Create an empty sorter.
    pub fn new(config: &SorterConfig) -> Result<Self, PackError> {
        if config.granularity == 0 {
            return Err(PackError::InvalidGranularity(config.granularity));
        }
        Ok(BucketSorter {
            granularity: config.granularity,
            pace: Duration::from_millis(config.pace_ms),
            allow_exact_fit: config.allow_exact_fit,
            buckets: BTreeMap::new(),
            history: Vec::new(),
            last_total: 0,
            rejected: Vec::new(),
        })
    }

    /// Create an empty sorter with default settings and the given bucket width.
    pub fn with_granularity(granularity: u64) -> Result<Self, PackError> {
        Self::new(&SorterConfig {
            granularity,
            ..SorterConfig::default()
        })
    }

    pub fn granularity(&self) -> u64 {
        self.granularity
    }

    /// Add an item to the pool.
    ///
    /// The size is taken as given; the sorter never stats anything itself.
    pub fn add(&mut self, id: impl Into<String>, size: ByteSize) {
        let key = bucket_key(size, self.granularity);
        let item = Item::new(id, size);
        debug!(id = %item.id, size, bucket = key, "Adding item to bucket");
        self.buckets.entry(key).or_default().push_back(item);
    }

    /// Non-empty bucket keys, largest first.
    pub fn list_buckets_descending(&self) -> Vec<BucketKey> {
        self.buckets.keys().rev().copied().collect()
    }

    /// Items currently in a bucket, in insertion order.
    pub fn bucket_items(&self, key: BucketKey) -> Vec<&Item> {
        self.buckets
            .get(&key)
            .map(|items| items.iter().collect())
            .unwrap_or_default()
    }

    /// Fit a subset of the pool into a new container of `target` bytes.
    ///
    /// Buckets are visited largest first and items within a bucket in
    /// insertion order. The first item of a bucket that does not fit ends the
    /// scan of that bucket. Negative-size items are pulled out of the pool
    /// into the rejected list.
    pub fn fit_into(&mut self, target: u64) -> Result<Container, PackError> {
        let mut container = Container::new(target);
        let mut running: ByteSize = 0;

        for (bucket_num, key) in self.list_buckets_descending().into_iter().enumerate() {
            debug!(bucket = key, bucket_num, "Processing bucket");

            let Some(items) = self.buckets.get_mut(&key) else {
                continue;
            };

            while let Some(item) = items.front() {
                debug!(
                    id = %item.id,
                    size = item.size,
                    running_size = running,
                    target,
                    "Checking item"
                );

                if item.size < 0 {
                    warn!(id = %item.id, size = item.size, "Rejecting item with negative size");
                    if let Some(item) = items.pop_front() {
                        self.rejected.push(RejectedItem {
                            item,
                            reason: RejectReason::NegativeSize,
                        });
                    }
                    continue;
                }

                if !fits(running, item.size, target, self.allow_exact_fit) {
                    debug!(bucket = key, "Dropping down to next bucket");
                    break;
                }

                container.add(item.id.clone(), item.size)?;
                running += item.size;
                debug!(id = %item.id, "Added item and removed it from bucket");
                items.pop_front();

                pause(self.pace);
            }

            if items.is_empty() {
                self.buckets.remove(&key);
                debug!(bucket = key, bucket_num, "Removed bucket");
            }

            pause(self.pace);
        }

        self.last_total = running;
        self.history.push(container.clone());

        info!(
            set = self.history.len(),
            items = container.len(),
            total_size = running,
            target,
            "Fitted container"
        );

        Ok(container)
    }

    /// Remove every item that could never fit a container of `target` bytes.
    ///
    /// Removed items are recorded in the rejected list and returned.
    pub fn take_oversized(&mut self, target: u64) -> Vec<Item> {
        let allow_exact_fit = self.allow_exact_fit;
        let mut taken = Vec::new();

        for items in self.buckets.values_mut() {
            let (keep, drop): (VecDeque<Item>, VecDeque<Item>) = items
                .drain(..)
                .partition(|item| item.size < 0 || fits(0, item.size, target, allow_exact_fit));
            *items = keep;
            taken.extend(drop);
        }
        self.buckets.retain(|_, items| !items.is_empty());

        for item in &taken {
            warn!(id = %item.id, size = item.size, target, "Item can never fit the target size");
            self.rejected.push(RejectedItem {
                item: item.clone(),
                reason: RejectReason::Oversized,
            });
        }
        taken
    }

    /// True when no bucket holds any item.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of items still waiting in the pool.
    pub fn pending_len(&self) -> usize {
        self.buckets.values().map(VecDeque::len).sum()
    }

    /// Sum of the sizes of items still waiting in the pool.
    pub fn pending_bytes(&self) -> ByteSize {
        self.buckets
            .values()
            .flat_map(|items| items.iter())
            .map(|item| item.size)
            .sum()
    }

    /// Items still waiting in the pool, largest bucket first.
    pub fn pending_items(&self) -> Vec<&Item> {
        self.buckets
            .values()
            .rev()
            .flat_map(|items| items.iter())
            .collect()
    }

    pub fn history(&self) -> &[Container] {
        &self.history
    }

    /// Running total recorded by the last `fit_into`.
    pub fn last_total(&self) -> ByteSize {
        self.last_total
    }

    pub fn rejected(&self) -> &[RejectedItem] {
        &self.rejected
    }
}

/// Fit check for adding `size` on top of `running` against `target`.
fn fits(running: ByteSize, size: ByteSize, target: u64, allow_exact_fit: bool) -> bool {
    let total = i128::from(running) + i128::from(size);
    let target = i128::from(target);
    if allow_exact_fit {
        total <= target
    } else {
        total < target
    }
}

fn pause(pace: Duration) {
    if !pace.is_zero() {
        std::thread::sleep(pace);
    }
}
