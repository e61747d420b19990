// Shared application state
// Built once during bootstrap and read-only afterwards; shared across
// connection tasks via Arc, so request handling needs no locks.

use crate::config::{Config, GatewaySettings};
use crate::gateway::mounts::MountTable;

pub struct AppState {
    pub config: Config,
    pub settings: GatewaySettings,
    pub mounts: MountTable,
}

impl AppState {
    pub const fn new(config: Config, settings: GatewaySettings, mounts: MountTable) -> Self {
        Self {
            config,
            settings,
            mounts,
        }
    }
}
