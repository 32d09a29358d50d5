//! Order scheduler
//!
//! Holds pending orders in a min-heap keyed by (priority, submission order)
//! and keeps a log of prepared orders. All access goes through three atomic
//! operations: submit, dispatch-next and snapshot.

mod core;
mod queue;

pub use self::core::OrderScheduler;
pub use queue::{SchedulerStats, Snapshot};
