//! Queue types for the scheduler

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderId, Priority};

/// Heap entry for a pending order
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the entry with
/// the smallest dispatch key compares greatest.
#[derive(Debug, Clone)]
pub(crate) struct PendingOrder(pub(crate) Order);

impl PendingOrder {
    /// Dispatch key. Ids are allocated under the same lock as insertion, so
    /// id order is submission order and never collides.
    pub(crate) fn key(&self) -> (Priority, OrderId) {
        (self.0.priority, self.0.id)
    }
}

impl Eq for PendingOrder {}

impl PartialEq for PendingOrder {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Ord for PendingOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower priority number first, then earlier submission
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for PendingOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Point-in-time copy of scheduler contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Pending orders in internal heap order (not dispatch order)
    pub pending: Vec<Order>,

    /// Prepared orders, oldest dispatch first
    pub prepared: Vec<Order>,
}

impl Snapshot {
    /// Pending orders sorted in the order they would be dispatched
    pub fn pending_by_dispatch_order(&self) -> Vec<Order> {
        let mut pending = self.pending.clone();
        pending.sort_by_key(|o| (o.priority, o.id));
        pending
    }

    /// Total orders ever submitted as of this snapshot
    pub fn total(&self) -> usize {
        self.pending.len() + self.prepared.len()
    }
}

/// Counters for the scheduler
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub total_submitted: u64,
    pub total_dispatched: u64,
    /// Dispatch calls that found nothing pending
    pub empty_dispatches: u64,
    pub peak_pending: usize,
    pub pending: usize,
    pub prepared: usize,
}
