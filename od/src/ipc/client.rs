//! IPC client for communicating with the order server
//!
//! Provides a simple interface for the CLI to send requests to `od serve`
//! via Unix Domain Socket.

use std::path::PathBuf;
use std::time::Duration;

use eyre::{Context, Result};
use tokio::io::BufReader;
use tokio::net::UnixStream;
use tracing::debug;

use crate::domain::{Order, Priority};
use crate::scheduler::{SchedulerStats, Snapshot};

use super::error::IpcError;
use super::get_socket_path;
use super::listener::{read_json_line, write_json_line};
use super::messages::{OrderRequest, OrderResponse};

/// Default timeout for IPC operations
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on a request line
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 4 * 1024;

/// Default cap on a response line; list responses grow with the prepared log
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Client for communicating with the order server via IPC
#[derive(Debug, Clone)]
pub struct OrderClient {
    socket_path: PathBuf,
    timeout: Duration,
    max_request_bytes: usize,
    max_response_bytes: usize,
}

impl Default for OrderClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderClient {
    /// Create a new client with the default socket path
    pub fn new() -> Self {
        Self::with_socket_path(get_socket_path())
    }

    /// Create a client with a custom socket path
    pub fn with_socket_path(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
            timeout: DEFAULT_TIMEOUT,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    /// Set a custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request and response size caps
    pub fn with_limits(mut self, max_request_bytes: usize, max_response_bytes: usize) -> Self {
        self.max_request_bytes = max_request_bytes;
        self.max_response_bytes = max_response_bytes;
        self
    }

    /// Check if the server socket exists
    pub fn socket_exists(&self) -> bool {
        self.socket_path.exists()
    }

    /// Submit an order
    pub async fn submit(&self, item: &str, priority: Priority) -> Result<Order> {
        debug!(%item, %priority, "OrderClient: submitting order");
        let msg = OrderRequest::Submit {
            item: item.to_string(),
            priority,
        };
        match self.send_message(msg).await? {
            OrderResponse::Submitted { order } => Ok(order),
            other => Err(unexpected(other).into()),
        }
    }

    /// Dispatch the next order; `None` when nothing is pending
    pub async fn prepare(&self) -> Result<Option<Order>> {
        debug!("OrderClient: preparing next order");
        match self.send_message(OrderRequest::Prepare).await? {
            OrderResponse::Prepared { order } => Ok(Some(order)),
            OrderResponse::NoneAvailable => Ok(None),
            other => Err(unexpected(other).into()),
        }
    }

    /// Snapshot pending and prepared orders
    pub async fn list(&self) -> Result<Snapshot> {
        debug!("OrderClient: listing orders");
        match self.send_message(OrderRequest::List).await? {
            OrderResponse::Orders { pending, prepared } => Ok(Snapshot { pending, prepared }),
            other => Err(unexpected(other).into()),
        }
    }

    /// Fetch scheduler counters
    pub async fn stats(&self) -> Result<SchedulerStats> {
        match self.send_message(OrderRequest::Stats).await? {
            OrderResponse::Stats { stats } => Ok(stats),
            other => Err(unexpected(other).into()),
        }
    }

    /// Check if the server is alive and get its version
    pub async fn ping(&self) -> Result<String> {
        debug!("OrderClient: pinging server");
        match self.send_message(OrderRequest::Ping).await? {
            OrderResponse::Pong { version } => Ok(version),
            other => Err(unexpected(other).into()),
        }
    }

    /// Request server to shutdown gracefully
    pub async fn shutdown(&self) -> Result<()> {
        debug!("OrderClient: requesting server shutdown");
        match self.send_message(OrderRequest::Shutdown).await? {
            OrderResponse::Ok => Ok(()),
            other => Err(unexpected(other).into()),
        }
    }

    /// Send a request to the server and wait for the response
    async fn send_message(&self, msg: OrderRequest) -> Result<OrderResponse> {
        debug!(?self.socket_path, ?msg, "OrderClient: sending message");

        let json = serde_json::to_string(&msg).context("Failed to serialize message")?;
        if json.len() >= self.max_request_bytes {
            return Err(IpcError::MessageTooLarge {
                limit: self.max_request_bytes,
            }
            .into());
        }

        let mut stream = tokio::time::timeout(self.timeout, UnixStream::connect(&self.socket_path))
            .await
            .context("Connection timeout")?
            .with_context(|| format!("Failed to connect to order server at {}", self.socket_path.display()))?;

        tokio::time::timeout(self.timeout, write_json_line(&mut stream, &msg))
            .await
            .context("Write timeout")?
            .context("Failed to send request")?;

        let mut reader = BufReader::new(&mut stream);
        let response: OrderResponse =
            tokio::time::timeout(self.timeout, read_json_line(&mut reader, self.max_response_bytes))
                .await
                .context("Read timeout")?
                .context("Failed to read server response")?;

        debug!(?response, "OrderClient: received response");
        Ok(response)
    }
}

/// Map a response the caller did not ask for into an error
fn unexpected(response: OrderResponse) -> IpcError {
    match response {
        OrderResponse::Error { message } => IpcError::Server(message),
        other => IpcError::UnexpectedResponse(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_client_default() {
        let client = OrderClient::default();
        assert!(client.socket_path.ends_with("od.sock"));
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_client_builders() {
        let client = OrderClient::with_socket_path(PathBuf::from("/custom/od.sock"))
            .with_timeout(Duration::from_secs(10))
            .with_limits(128, 256);
        assert_eq!(client.socket_path, PathBuf::from("/custom/od.sock"));
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!((client.max_request_bytes, client.max_response_bytes), (128, 256));
    }

    #[test]
    fn test_socket_exists_false() {
        let temp = TempDir::new().unwrap();
        let client = OrderClient::with_socket_path(temp.path().join("nonexistent.sock"));
        assert!(!client.socket_exists());
    }

    #[test]
    fn test_unexpected_maps_server_error() {
        let err = unexpected(OrderResponse::Error {
            message: "boom".to_string(),
        });
        assert!(matches!(err, IpcError::Server(ref m) if m == "boom"));

        let err = unexpected(OrderResponse::Ok);
        assert!(matches!(err, IpcError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_oversized_request_rejected_locally() {
        let temp = TempDir::new().unwrap();
        let client = OrderClient::with_socket_path(temp.path().join("od.sock")).with_limits(32, 1024);
        let err = client.submit(&"x".repeat(64), Priority(1)).await.unwrap_err();
        assert!(err.downcast_ref::<IpcError>().is_some());
    }

    #[tokio::test]
    async fn test_connect_fails_without_server() {
        let temp = TempDir::new().unwrap();
        let client = OrderClient::with_socket_path(temp.path().join("od.sock"));
        let err = client.ping().await.unwrap_err();
        assert!(err.to_string().contains("Failed to connect"));
    }
}
