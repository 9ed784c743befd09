#![forbid(unsafe_code)]

use ln_storage::StoreConfig;
use serde::Deserialize;
use std::path::Path;

/// On-disk YAML configuration. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) storage: StoreConfig,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("read config {}: {err}", path.display()))?;
        Self::parse(&raw)
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_storage_section_keeps_defaults() {
        let cfg = FileConfig::parse("storage:\n  max_backups: 3\n").expect("parse");
        assert_eq!(cfg.storage.max_backups, 3);
        assert_eq!(cfg.storage.quota_bytes, StoreConfig::default().quota_bytes);
        assert_eq!(
            cfg.storage.backups_kept_on_cleanup,
            StoreConfig::default().backups_kept_on_cleanup
        );
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FileConfig::parse("  \n").expect("parse"), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("storage:\n  quota: 1\n").is_err());
        assert!(FileConfig::parse("logging: {}\n").is_err());
    }
}
