//! Core types shared by the sorter, the containers and the driver.

use crate::error::PackError;
use serde::{Deserialize, Serialize};

/// Size of an item in bytes.
///
/// Signed so a bogus negative size reported by a caller can be carried and
/// rejected instead of wrapping around.
pub type ByteSize = i64;

/// Bucket key: an item size rounded down to a multiple of the granularity.
pub type BucketKey = u64;

/// 1 GiB in bytes
pub const GIB: u64 = 1024 * 1024 * 1024;

/// 1 MiB in bytes
pub const MIB: u64 = 1024 * 1024;

/// Default bucket width: 100 MiB.
pub const DEFAULT_GRANULARITY: u64 = 100 * MIB;

/// Default container target: a single-layer DVD.
///
/// Discs are sold as 4.7 GB using 1000-byte kilobytes, which is about 4.38 GiB.
/// Rounded down to 4.3 GiB to leave some headroom.
pub const SINGLE_LAYER_DVD_BYTES: u64 = GIB * 43 / 10;

/// An identifier paired with the size sampled when it entered the sorter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub size: ByteSize,
}

impl Item {
    pub fn new(id: impl Into<String>, size: ByteSize) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }
}

/// Why an item was pulled out of the pool without being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Size reported below zero
    NegativeSize,
    /// Larger than any container of the requested target can hold
    Oversized,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NegativeSize => write!(f, "negative size"),
            RejectReason::Oversized => write!(f, "larger than target"),
        }
    }
}

/// An item removed from the pool, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedItem {
    pub item: Item,
    pub reason: RejectReason,
}

impl RejectedItem {
    /// Error describing why the item cannot go into a container of `target` bytes.
    pub fn to_error(&self, target: u64) -> PackError {
        match self.reason {
            RejectReason::NegativeSize => PackError::InvalidSize {
                id: self.item.id.clone(),
                size: self.item.size,
            },
            RejectReason::Oversized => PackError::CapacityExceeded {
                attempted: self.item.size,
                max_size: target,
            },
        }
    }
}
