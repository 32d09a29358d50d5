//! Text rendering of server responses

use std::fmt::Write;

use crate::domain::Order;
use crate::scheduler::{SchedulerStats, Snapshot};

/// Line reported after a successful submit
pub fn render_submitted(order: &Order) -> String {
    format!(
        "Order received: ID={}, Item={}, Priority={}",
        order.id, order.item, order.priority
    )
}

/// Line reported after a prepare call
pub fn render_prepared(order: Option<&Order>) -> String {
    match order {
        Some(order) => format!("Order prepared: ID={}, Item={}", order.id, order.item),
        None => "No orders to prepare".to_string(),
    }
}

/// Pending section followed by the prepared log
///
/// With `sorted`, pending orders are shown in dispatch order; otherwise in
/// the server's queue order.
pub fn render_orders(snapshot: &Snapshot, sorted: bool) -> String {
    let pending = if sorted {
        snapshot.pending_by_dispatch_order()
    } else {
        snapshot.pending.clone()
    };

    let mut out = String::from("Pending Orders:\n");
    for order in &pending {
        let _ = writeln!(out, "ID={}, Item={}, Priority={}", order.id, order.item, order.priority);
    }

    out.push_str("\nPrepared Orders:\n");
    for order in &snapshot.prepared {
        let _ = writeln!(out, "ID={}, Item={}", order.id, order.item);
    }
    out
}

pub fn render_stats(stats: &SchedulerStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "OrderDispatch Stats");
    let _ = writeln!(out, "-------------------");
    let _ = writeln!(out, "Pending:          {}", stats.pending);
    let _ = writeln!(out, "Prepared:         {}", stats.prepared);
    let _ = writeln!(out, "Total submitted:  {}", stats.total_submitted);
    let _ = writeln!(out, "Total dispatched: {}", stats.total_dispatched);
    let _ = writeln!(out, "Empty dispatches: {}", stats.empty_dispatches);
    let _ = writeln!(out, "Peak pending:     {}", stats.peak_pending);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderId, Priority};

    fn order(id: u64, item: &str, priority: i64) -> Order {
        Order::new(OrderId(id), item, Priority(priority))
    }

    #[test]
    fn test_render_submitted() {
        let line = render_submitted(&order(1, "coffee", 2));
        assert_eq!(line, "Order received: ID=1, Item=coffee, Priority=2");
    }

    #[test]
    fn test_render_prepared() {
        assert_eq!(render_prepared(Some(&order(2, "tea", 1))), "Order prepared: ID=2, Item=tea");
        assert_eq!(render_prepared(None), "No orders to prepare");
    }

    #[test]
    fn test_render_orders() {
        let snapshot = Snapshot {
            pending: vec![order(3, "cake", 1), order(1, "coffee", 2)],
            prepared: vec![order(2, "tea", 1)],
        };
        let expected = "Pending Orders:\n\
                        ID=3, Item=cake, Priority=1\n\
                        ID=1, Item=coffee, Priority=2\n\
                        \n\
                        Prepared Orders:\n\
                        ID=2, Item=tea\n";
        assert_eq!(render_orders(&snapshot, false), expected);
    }

    #[test]
    fn test_render_orders_sorted() {
        let snapshot = Snapshot {
            pending: vec![order(1, "coffee", 2), order(4, "pie", 1), order(3, "cake", 1)],
            prepared: vec![],
        };
        let text = render_orders(&snapshot, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "ID=3, Item=cake, Priority=1");
        assert_eq!(lines[2], "ID=4, Item=pie, Priority=1");
        assert_eq!(lines[3], "ID=1, Item=coffee, Priority=2");
    }

    #[test]
    fn test_render_empty_orders() {
        assert_eq!(
            render_orders(&Snapshot::default(), false),
            "Pending Orders:\n\nPrepared Orders:\n"
        );
    }

    #[test]
    fn test_render_stats() {
        let stats = SchedulerStats {
            total_submitted: 3,
            total_dispatched: 1,
            pending: 2,
            prepared: 1,
            ..Default::default()
        };
        let text = render_stats(&stats);
        assert!(text.contains("Pending:          2"));
        assert!(text.contains("Total submitted:  3"));
    }
}
