//! Command-line overrides on top of [`Settings`], and the context/executor pair
//! built from the result.

use std::sync::Arc;
use std::time::Duration;

use config::Settings;
use serve::AppState;
use teleport::{
    register_teleport_tools, CommandExecutor, ServerConfig, ServerContext, ToolRegistry,
    TshExecutor,
};

/// Values given on the command line. `None` (or `false` for the switches)
/// leaves the configured value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub dry_run: bool,
    pub debug: bool,
    pub non_destructive: Option<bool>,
    pub tsh_binary: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, mut settings: Settings) -> Settings {
        settings.dry_run |= self.dry_run;
        settings.debug |= self.debug;
        if let Some(v) = self.non_destructive {
            settings.non_destructive = v;
        }
        if let Some(binary) = &self.tsh_binary {
            settings.tsh_binary = binary.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        settings
    }
}

/// Server context plus the live `tsh` executor sharing its shutdown token.
pub struct Runtime {
    settings: Settings,
    context: Arc<ServerContext>,
    executor: Arc<TshExecutor>,
}

impl Runtime {
    pub fn new(settings: Settings) -> Self {
        let context = Arc::new(ServerContext::new(ServerConfig {
            dry_run: settings.dry_run,
            debug: settings.debug,
            non_destructive: settings.non_destructive,
        }));
        let executor = Arc::new(
            TshExecutor::new(context.shutdown_token())
                .with_binary(settings.tsh_binary.clone())
                .with_timeout(settings.timeout),
        );
        Self {
            settings,
            context,
            executor,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn context(&self) -> &Arc<ServerContext> {
        &self.context
    }

    pub fn executor(&self) -> Arc<dyn CommandExecutor> {
        self.executor.clone()
    }

    /// Fresh registry with every Teleport tool.
    pub fn registry(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        register_teleport_tools(&mut registry, self.context.clone(), self.executor());
        registry
    }

    pub fn app_state(&self) -> AppState {
        AppState::for_teleport(self.context.clone(), self.executor())
    }
}
