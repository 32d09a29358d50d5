//! Order records handed out by the scheduler

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Priority;

/// Unique order identifier, assigned in submission order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Waiting in the priority queue
    Pending,
    /// Dispatched; terminal
    Prepared,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Prepared => write!(f, "prepared"),
        }
    }
}

/// A unit of prioritized work
///
/// Values returned by the scheduler are copies; mutating one has no effect
/// on scheduler state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item: String,
    pub priority: Priority,
    pub status: OrderStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepared_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create a pending order stamped with the current time
    pub fn new(id: OrderId, item: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            item: item.into(),
            priority,
            status: OrderStatus::Pending,
            submitted_at: Utc::now(),
            prepared_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Transition to prepared. Only the scheduler calls this, once per order.
    pub(crate) fn mark_prepared(&mut self) {
        self.status = OrderStatus::Prepared;
        self.prepared_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(OrderId(1), "coffee", Priority(2));
        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.item, "coffee");
        assert_eq!(order.priority, Priority(2));
        assert!(order.is_pending());
        assert!(order.prepared_at.is_none());
    }

    #[test]
    fn test_mark_prepared() {
        let mut order = Order::new(OrderId(7), "tea", Priority(1));
        order.mark_prepared();
        assert_eq!(order.status, OrderStatus::Prepared);
        assert!(!order.is_pending());
        assert!(order.prepared_at.unwrap() >= order.submitted_at);
    }

    #[test]
    fn test_order_serde() {
        let order = Order::new(OrderId(3), "cake", Priority(-1));
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["item"], "cake");
        assert_eq!(json["priority"], -1);
        assert_eq!(json["status"], "pending");
        assert!(json.get("prepared_at").is_none());

        let parsed: Order = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, order);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Prepared.to_string(), "prepared");
    }
}
