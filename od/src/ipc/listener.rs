//! IPC listener and framing for the server side
//!
//! Provides helpers for creating and managing the Unix Domain Socket listener,
//! plus line framing shared with the client.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, warn};

use super::error::IpcError;
use super::messages::{OrderRequest, OrderResponse};

/// Create and bind a Unix Domain Socket listener at `socket_path`
///
/// Handles cleanup of stale socket files from previous runs.
pub fn create_listener_at(socket_path: &Path) -> Result<(UnixListener, PathBuf)> {
    debug!(?socket_path, "create_listener: creating IPC socket");

    if let Some(parent) = socket_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create socket directory")?;
    }

    if socket_path.exists() {
        debug!(?socket_path, "create_listener: removing stale socket");
        std::fs::remove_file(socket_path).context("Failed to remove stale socket")?;
    }

    let listener = UnixListener::bind(socket_path).context("Failed to bind IPC socket")?;
    debug!(?socket_path, "create_listener: socket bound successfully");

    Ok((listener, socket_path.to_path_buf()))
}

/// Remove the socket file on shutdown
pub fn cleanup_socket(socket_path: &Path) {
    if socket_path.exists() {
        debug!(?socket_path, "cleanup_socket: removing socket file");
        if let Err(e) = std::fs::remove_file(socket_path) {
            warn!(?socket_path, error = %e, "Failed to remove socket file");
        }
    }
}

/// Read one `\n`-terminated JSON value, refusing lines over `limit` bytes
pub async fn read_json_line<R, T>(reader: &mut R, limit: usize) -> Result<T, IpcError>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    let mut line = String::new();
    let bytes_read = reader.take(limit as u64 + 1).read_line(&mut line).await?;

    if bytes_read > limit {
        return Err(IpcError::MessageTooLarge { limit });
    }
    if line.trim().is_empty() {
        return Err(IpcError::EmptyMessage);
    }

    Ok(serde_json::from_str(line.trim())?)
}

/// Write one JSON value followed by `\n` and flush
pub async fn write_json_line<W, T>(writer: &mut W, value: &T) -> Result<(), IpcError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let json = serde_json::to_string(value)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Read the request on a freshly accepted connection
pub async fn read_message(stream: &mut UnixStream, limit: usize) -> Result<OrderRequest, IpcError> {
    let mut reader = BufReader::new(stream);
    let msg = read_json_line(&mut reader, limit).await?;
    debug!(?msg, "read_message: parsed message");
    Ok(msg)
}

/// Send a response on the stream
pub async fn send_response(stream: &mut UnixStream, response: &OrderResponse) -> Result<(), IpcError> {
    write_json_line(stream, response).await?;
    debug!(?response, "send_response: sent response");
    Ok(())
}
