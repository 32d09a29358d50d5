//! Order server: maps IPC requests onto the scheduler
//!
//! The server is the only validation boundary. Requests that fail to parse
//! (including a priority that is not an integer) are answered with an error
//! and never reach the scheduler.

use std::path::PathBuf;
use std::sync::Arc;

use eyre::Result;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::VERSION;
use crate::scheduler::OrderScheduler;

use super::error::IpcError;
use super::listener::{cleanup_socket, read_message, send_response};
use super::messages::{OrderRequest, OrderResponse};

/// Serves one scheduler over a Unix socket
#[derive(Clone)]
pub struct OrderServer {
    scheduler: Arc<OrderScheduler>,
    max_request_bytes: usize,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl OrderServer {
    pub fn new(scheduler: Arc<OrderScheduler>, max_request_bytes: usize) -> Self {
        debug!(max_request_bytes, "OrderServer::new: called");
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            scheduler,
            max_request_bytes,
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    pub fn scheduler(&self) -> &Arc<OrderScheduler> {
        &self.scheduler
    }

    /// Ask the accept loop to stop
    pub fn request_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Run one request against the scheduler
    pub fn handle(&self, request: OrderRequest) -> OrderResponse {
        debug!(?request, "OrderServer::handle: called");
        match request {
            OrderRequest::Submit { item, priority } => {
                let order = self.scheduler.submit(item, priority);
                info!(id = %order.id, item = %order.item, %priority, "Order received");
                OrderResponse::Submitted { order }
            }
            OrderRequest::Prepare => match self.scheduler.dispatch_next() {
                Some(order) => {
                    info!(id = %order.id, item = %order.item, "Order prepared");
                    OrderResponse::Prepared { order }
                }
                None => OrderResponse::NoneAvailable,
            },
            OrderRequest::List => {
                let snapshot = self.scheduler.snapshot();
                OrderResponse::Orders {
                    pending: snapshot.pending,
                    prepared: snapshot.prepared,
                }
            }
            OrderRequest::Stats => OrderResponse::Stats {
                stats: self.scheduler.stats(),
            },
            OrderRequest::Ping => OrderResponse::Pong {
                version: VERSION.to_string(),
            },
            OrderRequest::Shutdown => {
                info!("Shutdown requested over IPC");
                self.request_shutdown();
                OrderResponse::Ok
            }
        }
    }

    /// Accept connections until shutdown is requested or Ctrl-C arrives
    ///
    /// Removes the socket file before returning.
    pub async fn run(self, listener: UnixListener, socket_path: PathBuf) -> Result<()> {
        info!(?socket_path, "OrderServer listening");
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        while !*shutdown_rx.borrow_and_update() {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        let server = self.clone();
                        tokio::spawn(async move {
                            if let Err(e) = server.serve_connection(stream).await {
                                warn!(error = %e, "Failed to serve IPC connection");
                            }
                        });
                    }
                    Err(e) => warn!(error = %e, "Failed to accept IPC connection"),
                },
                _ = shutdown_rx.changed() => {
                    debug!("OrderServer::run: shutdown signalled");
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, shutting down");
                    break;
                }
            }
        }

        cleanup_socket(&socket_path);
        let stats = self.scheduler.stats();
        info!(
            submitted = stats.total_submitted,
            dispatched = stats.total_dispatched,
            pending = stats.pending,
            "OrderServer stopped"
        );
        Ok(())
    }

    async fn serve_connection(&self, mut stream: UnixStream) -> Result<(), IpcError> {
        let response = match read_message(&mut stream, self.max_request_bytes).await {
            Ok(request) => self.handle(request),
            Err(e) => {
                debug!(error = %e, "OrderServer::serve_connection: rejecting request");
                OrderResponse::Error {
                    message: format!("Invalid request: {}", e),
                }
            }
        };
        send_response(&mut stream, &response).await
    }
}
