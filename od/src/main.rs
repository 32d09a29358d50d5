//! OrderDispatch - priority order dispatcher
//!
//! CLI entry point for running the order server and talking to it.

use std::fs;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use orderdispatch::cli::{Cli, Command, OutputFormat, get_log_path};
use orderdispatch::config::Config;
use orderdispatch::ipc::listener::create_listener_at;
use orderdispatch::ipc::{OrderClient, OrderServer};
use orderdispatch::output;
use orderdispatch::{OrderScheduler, Priority};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(socket) = cli.socket {
        config.server.socket_path = Some(socket);
    }

    match cli.command {
        Command::Serve => cmd_serve(&config).await,
        Command::Add { item, priority, format } => cmd_add(&config.client(), &item, priority, format).await,
        Command::Prepare { format } => cmd_prepare(&config.client(), format).await,
        Command::List { sorted, format } => cmd_list(&config.client(), sorted, format).await,
        Command::Stats { format } => cmd_stats(&config.client(), format).await,
        Command::Ping => cmd_ping(&config.client()).await,
        Command::Stop => cmd_stop(&config.client()).await,
    }
}

/// Run the server until `od stop` or Ctrl-C
async fn cmd_serve(config: &Config) -> Result<()> {
    let socket_path = config.socket_path();

    let client = config.client();
    if client.socket_exists() && client.ping().await.is_ok() {
        return Err(eyre::eyre!("Order server already running at {}", socket_path.display()));
    }

    let (listener, socket_path) = create_listener_at(&socket_path)?;
    let server = OrderServer::new(Arc::new(OrderScheduler::new()), config.server.max_request_bytes);

    println!("Order server listening on {}", socket_path.display().to_string().cyan());
    server.run(listener, socket_path).await
}

async fn cmd_add(client: &OrderClient, item: &str, priority: Priority, format: OutputFormat) -> Result<()> {
    let order = client.submit(item, priority).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
        OutputFormat::Text => println!("{}", output::render_submitted(&order)),
    }
    Ok(())
}

async fn cmd_prepare(client: &OrderClient, format: OutputFormat) -> Result<()> {
    let order = client.prepare().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
        OutputFormat::Text => println!("{}", output::render_prepared(order.as_ref())),
    }
    Ok(())
}

async fn cmd_list(client: &OrderClient, sorted: bool, format: OutputFormat) -> Result<()> {
    let mut snapshot = client.list().await?;
    match format {
        OutputFormat::Json => {
            if sorted {
                snapshot.pending = snapshot.pending_by_dispatch_order();
            }
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        OutputFormat::Text => print!("{}", output::render_orders(&snapshot, sorted)),
    }
    Ok(())
}

async fn cmd_stats(client: &OrderClient, format: OutputFormat) -> Result<()> {
    let stats = client.stats().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => print!("{}", output::render_stats(&stats)),
    }
    Ok(())
}

async fn cmd_ping(client: &OrderClient) -> Result<()> {
    let version = client.ping().await?;
    println!("{} Order server is running (version {})", "✓".green(), version);
    Ok(())
}

async fn cmd_stop(client: &OrderClient) -> Result<()> {
    if !client.socket_exists() {
        println!("Order server is not running");
        return Ok(());
    }
    client.shutdown().await?;
    println!("{} Order server stopped", "✓".green());
    Ok(())
}
