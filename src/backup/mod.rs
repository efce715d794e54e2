//! Snapshot wire format and codec for library backups.
//!
//! A backup is a gzip-compressed JSON document. The structure is versioned
//! and treated as a fixed external schema; legacy sections (`broken_*`) are
//! read for compatibility but never written.

pub mod codec;
pub mod notifier;
pub mod snapshot;

pub use codec::SnapshotCodecError;
pub use notifier::{NullNotifier, RestoreNotifier, TracingNotifier};
pub use snapshot::Snapshot;
