//! IPC message types for order server communication
//!
//! Simple JSON-over-newline protocol. Each message is a single line of JSON followed by `\n`.

use serde::{Deserialize, Serialize};

use crate::domain::{Order, Priority};
use crate::scheduler::SchedulerStats;

/// Messages from CLI to server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OrderRequest {
    /// Submit a new order
    Submit { item: String, priority: Priority },

    /// Dispatch the most urgent pending order
    Prepare,

    /// Snapshot pending and prepared orders
    List,

    /// Scheduler counters
    Stats,

    /// Ping to check if the server is alive
    Ping,

    /// Request server to stop gracefully
    Shutdown,
}

/// Responses from server to CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OrderResponse {
    /// Order accepted
    Submitted { order: Order },

    /// Order dispatched
    Prepared { order: Order },

    /// Nothing pending to dispatch
    NoneAvailable,

    /// Snapshot of the scheduler
    Orders { pending: Vec<Order>, prepared: Vec<Order> },

    Stats { stats: SchedulerStats },

    /// Pong response to ping
    Pong { version: String },

    /// Acknowledgment
    Ok,

    /// Error response
    Error { message: String },
}
