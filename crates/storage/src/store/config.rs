#![forbid(unsafe_code)]

use serde::Deserialize;

/// Browsers give an origin roughly this much local storage.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_BACKUPS: usize = 5;
pub const DEFAULT_BACKUPS_KEPT_ON_CLEANUP: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub quota_bytes: u64,
    pub max_backups: usize,
    pub backups_kept_on_cleanup: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            quota_bytes: DEFAULT_QUOTA_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
            backups_kept_on_cleanup: DEFAULT_BACKUPS_KEPT_ON_CLEANUP,
        }
    }
}
