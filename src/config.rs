use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const ZENN_ENDPOINT: &str = "https://zenn.dev/api/articles";
pub const MCP_PATH: &str = "/mcp";

/// Upper bound for a single upstream round trip.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub zenn_endpoint: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_port_var(env::var("PORT").ok())
    }

    /// Builds the config from the raw `PORT` value; the host is always all interfaces.
    pub fn from_port_var(port: Option<String>) -> Result<Self> {
        let port = match port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::ConfigError(format!("Invalid port {:?}: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            ..Config::default()
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.zenn_endpoint = endpoint.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            zenn_endpoint: ZENN_ENDPOINT.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}
