use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Log handle owned by each tool; every line carries the tool's scope.
#[derive(Clone, Debug)]
pub struct Logger {
    scope: String,
}

impl Logger {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    pub fn scoped(&self, scope: &str) -> Self {
        Self::new(format!("{}::{}", self.scope, scope))
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn info(&self, message: &str) {
        tracing::info!(scope = %self.scope, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!(scope = %self.scope, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!(scope = %self.scope, "{}", message);
    }
}

/// Installs the fmt subscriber once (`RUST_LOG`, default `info`) and hands back the root logger.
pub fn init_logging(root: &str) -> Logger {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // Already set by an embedding process or test harness.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
    Logger::new(root)
}
