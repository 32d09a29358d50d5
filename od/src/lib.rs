//! OrderDispatch - in-memory priority order dispatcher
//!
//! Clients submit orders tagged with an integer priority. A dispatcher
//! repeatedly prepares the most urgent pending order; lower numbers are more
//! urgent and ties go to the earliest submission.
//!
//! # Modules
//!
//! - [`scheduler`] - the concurrent min-heap scheduler and prepared log
//! - [`domain`] - order, id, status and priority types
//! - [`ipc`] - Unix socket server and client exposing add/prepare/list
//! - [`output`] - text rendering of results
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```
//! use orderdispatch::{OrderScheduler, Priority};
//!
//! let scheduler = OrderScheduler::new();
//! scheduler.submit("coffee", Priority(2));
//! scheduler.submit("tea", Priority(1));
//!
//! assert_eq!(scheduler.dispatch_next().unwrap().item, "tea");
//! assert_eq!(scheduler.dispatch_next().unwrap().item, "coffee");
//! assert!(scheduler.dispatch_next().is_none());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod output;
pub mod scheduler;

pub use config::Config;
pub use domain::{Order, OrderId, OrderStatus, Priority, PriorityParseError};
pub use ipc::{IpcError, OrderClient, OrderRequest, OrderResponse, OrderServer};
pub use scheduler::{OrderScheduler, SchedulerStats, Snapshot};

/// Crate version reported by `ping`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
