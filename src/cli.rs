//! Command-line entry point shared by both server binaries.
//!
//! The only argument is an optional positional port. Each binary supplies its
//! own default (`routebench` listens on 3001, `routebench-alt` on 3002).

use crate::dispatcher::Dispatcher;
use crate::logging::{init_logging, LogConfig};
use crate::registry::build_router;
use crate::runtime_config::RuntimeConfig;
use crate::server::{AppService, HttpServer, ServerHandle};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Default port of the `routebench` binary
pub const DEFAULT_PORT: u16 = 3001;
/// Default port of the `routebench-alt` binary
pub const ALT_DEFAULT_PORT: u16 = 3002;

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(about = "Demo HTTP benchmark server", long_about = None)]
pub struct Cli {
    /// Port to listen on
    pub port: Option<u16>,
}

impl Cli {
    #[must_use]
    pub fn port_or(&self, default_port: u16) -> u16 {
        self.port.unwrap_or(default_port)
    }
}

/// Start the demo server on `0.0.0.0:<port>` and return its handle.
///
/// # Errors
///
/// Returns an error if the port cannot be bound.
pub fn start(port: u16) -> Result<ServerHandle> {
    let router = Arc::new(build_router());
    router.dump_routes();
    let service = AppService::new(Arc::new(Dispatcher::new(router)));

    info!(port = port, "server starting");
    HttpServer(service)
        .start(("0.0.0.0", port))
        .with_context(|| format!("Failed to bind port {port}"))
}

/// Parse arguments, initialize logging and the runtime, and serve until the
/// server coroutine exits.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized, the port cannot be bound,
/// or the server coroutine panics.
pub fn run(default_port: u16) -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&LogConfig::from_env())?;
    RuntimeConfig::from_env().apply();

    let handle = start(cli.port_or(default_port))?;
    handle
        .join()
        .map_err(|e| anyhow!("Server failed: {e:?}"))
}
