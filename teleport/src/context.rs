//! Server-wide flags and the shutdown signal.
//!
//! Tools never read the lock directly: each invocation takes a [`ServerConfig`]
//! snapshot up front and passes it down by reference.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Immutable view of the server flags for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Describe commands instead of running them.
    pub dry_run: bool,
    /// Log built command lines at info level.
    pub debug: bool,
    pub non_destructive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            debug: false,
            non_destructive: true,
        }
    }
}

/// Shared, runtime-togglable server state.
#[derive(Debug, Default)]
pub struct ServerContext {
    config: RwLock<ServerConfig>,
    shutdown: CancellationToken,
}

impl ServerContext {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            shutdown: CancellationToken::new(),
        }
    }

    /// Uses `shutdown` so a parent token (e.g. the process signal handler) can
    /// cancel this context.
    pub fn with_shutdown(config: ServerConfig, shutdown: CancellationToken) -> Self {
        Self {
            config: RwLock::new(config),
            shutdown,
        }
    }

    pub fn snapshot(&self) -> ServerConfig {
        *self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_dry_run(&self) -> bool {
        self.snapshot().dry_run
    }

    pub fn is_debug_mode(&self) -> bool {
        self.snapshot().debug
    }

    pub fn is_non_destructive(&self) -> bool {
        self.snapshot().non_destructive
    }

    pub fn set_dry_run(&self, enabled: bool) {
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .dry_run = enabled;
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .debug = enabled;
    }

    /// Token cancelled on shutdown; clone it into anything that must stop.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Idempotent.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_live_quiet_and_non_destructive() {
        let ctx = ServerContext::default();
        let cfg = ctx.snapshot();
        assert!(!cfg.dry_run);
        assert!(!cfg.debug);
        assert!(cfg.non_destructive);
    }

    #[test]
    fn toggles_do_not_affect_taken_snapshots() {
        let ctx = ServerContext::new(ServerConfig::default());
        let before = ctx.snapshot();
        ctx.set_dry_run(true);
        ctx.set_debug_mode(true);
        assert!(!before.dry_run);
        assert!(ctx.is_dry_run());
        assert!(ctx.is_debug_mode());
    }

    #[test]
    fn shutdown_cancels_shared_token() {
        let ctx = ServerContext::default();
        let token = ctx.shutdown_token();
        assert!(!ctx.is_shutting_down());
        ctx.shutdown();
        ctx.shutdown();
        assert!(token.is_cancelled());
        assert!(ctx.is_shutting_down());
    }
}
