pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod tools;
pub mod zenn;

use std::sync::Arc;
use config::Config;
use logging::Logger;
use tools::ToolRegistry;
use zenn::ZennClient;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tools: Arc<ToolRegistry>,
    pub logger: Logger,
}

impl AppState {
    pub fn new(config: Config, logger: Logger) -> Self {
        let zenn = ZennClient::from_config(&config);
        let tools = ToolRegistry::new(zenn, &logger);
        Self {
            config: Arc::new(config),
            tools: Arc::new(tools),
            logger,
        }
    }
}
