//! # Runtime Configuration Module
//!
//! Environment variable-based tuning for the `may` coroutine runtime that the
//! HTTP transport runs on.
//!
//! ## Environment Variables
//!
//! ### `ROUTEBENCH_STACK_SIZE`
//!
//! Stack size for connection coroutines. Accepts decimal (`16384`) or
//! hexadecimal (`0x4000`). Default: `0x4000` (16 KB).
//!
//! ### `ROUTEBENCH_WORKERS`
//!
//! Number of `may` worker threads. Unset leaves the runtime default (one per core).
//!
//! ## Usage
//!
//! ```rust
//! use routebench::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;
use tracing::info;

pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Worker thread count; `None` keeps the runtime default
    pub workers: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            workers: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("ROUTEBENCH_STACK_SIZE").ok().as_deref(),
            env::var("ROUTEBENCH_WORKERS").ok().as_deref(),
        )
    }

    /// Build from raw variable values; unparseable values fall back to defaults.
    #[must_use]
    pub fn from_values(stack_size: Option<&str>, workers: Option<&str>) -> Self {
        Self {
            stack_size: stack_size
                .and_then(parse_size)
                .unwrap_or(DEFAULT_STACK_SIZE),
            workers: workers
                .and_then(|w| w.trim().parse().ok())
                .filter(|&w: &usize| w > 0),
        }
    }

    /// Apply to the global `may` configuration. Call before starting the server.
    pub fn apply(&self) {
        let config = may::config();
        config.set_stack_size(self.stack_size);
        if let Some(workers) = self.workers {
            config.set_workers(workers);
        }
        info!(
            stack_size = self.stack_size,
            workers = ?self.workers,
            "Coroutine runtime configured"
        );
    }
}

/// Parse a byte size given in decimal or `0x`-prefixed hexadecimal.
#[must_use]
pub fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim();
    match value.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
