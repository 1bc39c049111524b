// Configuration module entry point
// Loads the server configuration from an optional file and the environment

mod types;

use std::net::SocketAddr;
use std::time::Duration;

pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

use crate::nfc::{Ext, UnknownExtension};
use crate::server::ServerOptions;

/// Default config file, looked up as `orbitip.toml` (or any format `config` knows)
pub const DEFAULT_CONFIG_PATH: &str = "orbitip";

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (extension optional).
    /// A missing file is not an error; `ORBIT_`-prefixed environment
    /// variables override file values, e.g. `ORBIT_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("ORBIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.root", crate::nfc::DEFAULT_ROOT)?
            .set_default("server.ext", "php")?
            .set_default("logging.level", "info")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// The configured path extension
    pub fn ext(&self) -> Result<Ext, UnknownExtension> {
        self.server.ext.parse()
    }

    /// Connection settings for the server
    pub fn server_options(&self) -> ServerOptions {
        let perf = &self.performance;
        ServerOptions {
            keep_alive: perf.keep_alive_timeout > 0,
            connection_timeout: match std::cmp::max(perf.read_timeout, perf.write_timeout) {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            max_connections: perf
                .max_connections
                .map(|max| usize::try_from(max).unwrap_or(usize::MAX)),
        }
    }
}
