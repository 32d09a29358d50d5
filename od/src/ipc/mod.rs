//! Inter-Process Communication for the order server
//!
//! Unix Domain Socket transport between the `od` CLI and a running
//! `od serve`. Each connection carries one request line and one response
//! line of JSON.

use std::path::PathBuf;

pub mod client;
pub mod error;
pub mod listener;
pub mod messages;
pub mod server;

pub use client::OrderClient;
pub use error::IpcError;
pub use messages::{OrderRequest, OrderResponse};
pub use server::OrderServer;

/// Get the default socket path for the order server
pub fn get_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("orderdispatch")
        .join("od.sock")
}
