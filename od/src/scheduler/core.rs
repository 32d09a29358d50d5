//! Scheduler implementation

use std::collections::BinaryHeap;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{Order, OrderId, Priority};

use super::queue::{PendingOrder, SchedulerStats, Snapshot};

/// Pending side of the scheduler, protected by the pending lock
struct PendingState {
    /// Min-heap of waiting orders
    queue: BinaryHeap<PendingOrder>,

    /// Last id handed out
    last_id: u64,

    /// Statistics
    stats: SchedulerStats,
}

/// The OrderScheduler owns every order for the lifetime of the process.
///
/// Lock order is always `pending` then `prepared`. Every operation runs to
/// completion without awaiting or doing I/O, so it is safe to call from any
/// thread or async task.
pub struct OrderScheduler {
    pending: Mutex<PendingState>,
    prepared: Mutex<Vec<Order>>,
}

impl Default for OrderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        debug!("OrderScheduler::new: called");
        Self {
            pending: Mutex::new(PendingState {
                queue: BinaryHeap::new(),
                last_id: 0,
                stats: SchedulerStats::default(),
            }),
            prepared: Mutex::new(Vec::new()),
        }
    }

    /// Submit a new order and return a copy of it
    pub fn submit(&self, item: impl Into<String>, priority: Priority) -> Order {
        let mut inner = self.pending.lock();

        inner.last_id += 1;
        let order = Order::new(OrderId(inner.last_id), item, priority);
        inner.queue.push(PendingOrder(order.clone()));

        inner.stats.total_submitted += 1;
        inner.stats.peak_pending = inner.stats.peak_pending.max(inner.queue.len());

        debug!(id = %order.id, %priority, pending = inner.queue.len(), "OrderScheduler::submit: queued");
        order
    }

    /// Remove the most urgent pending order, mark it prepared and log it
    ///
    /// Returns `None` when nothing is pending.
    pub fn dispatch_next(&self) -> Option<Order> {
        let mut inner = self.pending.lock();

        let Some(PendingOrder(mut order)) = inner.queue.pop() else {
            inner.stats.empty_dispatches += 1;
            debug!("OrderScheduler::dispatch_next: queue empty");
            return None;
        };
        order.mark_prepared();
        inner.stats.total_dispatched += 1;

        // Append while still holding the pending lock so a concurrent
        // snapshot never sees the order in neither collection.
        self.prepared.lock().push(order.clone());
        drop(inner);

        debug!(id = %order.id, priority = %order.priority, "OrderScheduler::dispatch_next: prepared");
        Some(order)
    }

    /// Copy pending and prepared orders at a single consistent instant
    pub fn snapshot(&self) -> Snapshot {
        debug!("OrderScheduler::snapshot: called");
        let inner = self.pending.lock();
        let prepared = self.prepared.lock();

        Snapshot {
            pending: inner.queue.iter().map(|p| p.0.clone()).collect(),
            prepared: prepared.clone(),
        }
    }

    /// Get the scheduler statistics
    pub fn stats(&self) -> SchedulerStats {
        let inner = self.pending.lock();
        let prepared = self.prepared.lock();

        SchedulerStats {
            pending: inner.queue.len(),
            prepared: prepared.len(),
            ..inner.stats.clone()
        }
    }

    /// Number of orders waiting to be dispatched
    pub fn pending_len(&self) -> usize {
        self.pending.lock().queue.len()
    }

    /// Number of orders in the prepared log
    pub fn prepared_len(&self) -> usize {
        self.prepared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_len() == 0
    }
}
