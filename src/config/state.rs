// Application state module
// Immutable per-process state shared by every connection

use super::types::Config;
use crate::assets::AssetLayout;

/// Application state, built once at startup and injected into the server
pub struct AppState {
    pub config: Config,
    pub layout: AssetLayout,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let layout = config.asset_layout();
        Self { config, layout }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
