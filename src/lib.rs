//! Discfit: bucket-sorted packing of files onto fixed-size discs
//!
//! Files are grouped into coarse size buckets and drained largest-first into
//! containers that never exceed a target size (by default a single-layer DVD).

pub mod config;
pub mod container;
pub mod driver;
pub mod error;
pub mod logging;
pub mod report;
pub mod scan;
pub mod sorter;
pub mod tooling;
pub mod types;

pub use container::Container;
pub use driver::{pack, PackPlan, PackSummary, StopReason};
pub use error::{ApiError, PackError};
pub use sorter::{bucket_key, BucketSorter, SorterConfig};
pub use types::{Item, RejectReason, RejectedItem};
