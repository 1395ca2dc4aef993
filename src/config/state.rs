// Application state module
// Immutable per-process state shared by all connections

use super::types::Config;
use crate::directory::CafeDirectory;

/// Application state
///
/// The directory is populated once at startup and never mutated afterward,
/// so concurrent request handlers share it without locking.
pub struct AppState {
    pub config: Config,
    pub directory: CafeDirectory,
}

impl AppState {
    pub const fn new(config: Config, directory: CafeDirectory) -> Self {
        Self { config, directory }
    }
}
