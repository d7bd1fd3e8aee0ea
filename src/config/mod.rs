// Configuration module entry point
// Loads layered configuration and holds the per-process application state

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

use crate::assets::AssetLayout;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PathsConfig, PerformanceConfig, ServerConfig};

/// Default configuration file (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "dimsum.toml";

/// Asset root used when neither the file nor the environment names one.
/// Anchored at the crate directory so both binaries find the same tree from any CWD.
#[must_use]
pub fn default_asset_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("public")
        .to_string_lossy()
        .into_owned()
}

impl Config {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path.
    /// A missing file is fine; defaults and `DIMSUM__*` environment variables still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("paths.asset_root", default_asset_root())?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.max_body_size", 104_857_600)? // 100MB
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 120)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DIMSUM")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Apply command line / `HOST` / `PORT` overrides on top of the loaded file
    #[must_use]
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        asset_root: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(root) = asset_root {
            self.paths.asset_root = root;
        }
        self
    }

    /// Resolve `server.host` (IP literal or hostname) to the first matching address
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self
            .server
            .host
            .trim_start_matches('[')
            .trim_end_matches(']');
        (host, self.server.port)
            .to_socket_addrs()
            .map_err(|e| format!("Invalid address '{host}': {e}"))?
            .next()
            .ok_or_else(|| format!("Invalid address '{host}': no addresses resolved"))
    }

    pub fn asset_layout(&self) -> AssetLayout {
        AssetLayout::new(&self.paths.asset_root)
    }
}
