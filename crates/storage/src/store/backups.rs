#![forbid(unsafe_code)]

use super::*;
use sha2::Digest as _;
use std::collections::HashSet;
use std::fmt::Write as _;
use time::macros::format_description;

/// Backup metadata; the snapshot itself is stored under its own key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    pub id: i64,
    pub name: String,
    pub timestamp: String,
    pub sha256: String,
    pub bytes: u64,
}

fn blob_key(id: i64) -> String {
    format!("{BACKUP_DATA_PREFIX}{id}")
}

fn sha256_hex(text: &str) -> String {
    let digest = sha2::Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(64);
    for b in digest {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn backup_name(now: OffsetDateTime) -> String {
    let stamp = now
        .format(format_description!(
            "[day]/[month]/[year] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| dates::to_rfc3339(now));
    format!("Backup {stamp}")
}

impl FamilyStore {
    /// Newest first.
    pub fn backups(&self) -> Result<Vec<BackupEntry>, StoreError> {
        let Some(raw) = self.local.get_item(BACKUP_LIST_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(list) => Ok(list),
            Err(err) => {
                warn!(error = %err, "backup list is unreadable, treating it as empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn create_backup(&mut self) -> Result<BackupEntry, StoreError> {
        let snapshot = self.export_json()?;
        let now = self.now();
        let id = self.ids.next(dates::now_ms(now));
        let entry = BackupEntry {
            id,
            name: backup_name(now),
            timestamp: dates::to_rfc3339(now),
            sha256: sha256_hex(&snapshot),
            bytes: snapshot.len() as u64,
        };
        let key = blob_key(id);
        self.write_with_cleanup(&key, &snapshot)?;

        let evicted = match self.record_backup(&entry) {
            Ok(evicted) => evicted,
            Err(err) => {
                warn!(backup = id, error = %err, "backup list not written, dropping snapshot");
                if let Err(cleanup) = self.local.remove_item(&key) {
                    warn!(backup = id, error = %cleanup, "could not drop unlisted snapshot");
                }
                return Err(err);
            }
        };
        for old in &evicted {
            self.local.remove_item(&blob_key(old.id))?;
        }
        info!(backup = id, bytes = entry.bytes, evicted = evicted.len(), "backup created");
        Ok(entry)
    }

    /// Replaces the current families with the snapshot after checking its digest.
    pub fn restore_backup(&mut self, id: i64) -> Result<ImportSummary, StoreError> {
        let entry = self
            .backups()?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or(StoreError::UnknownBackup(id))?;
        let Some(snapshot) = self.local.get_item(&blob_key(id))? else {
            return Err(StoreError::BackupCorrupted(id));
        };
        if sha256_hex(&snapshot) != entry.sha256 {
            warn!(backup = id, "backup checksum mismatch");
            return Err(StoreError::BackupCorrupted(id));
        }
        let summary = self.import_json(&snapshot)?;
        info!(backup = id, "backup restored");
        Ok(summary)
    }

    pub fn delete_backup(&mut self, id: i64) -> Result<BackupEntry, StoreError> {
        let mut list = self.backups()?;
        let Some(pos) = list.iter().position(|entry| entry.id == id) else {
            return Err(StoreError::UnknownBackup(id));
        };
        let removed = list.remove(pos);
        self.write_backup_list(&list)?;
        self.local.remove_item(&blob_key(id))?;
        info!(backup = id, "backup deleted");
        Ok(removed)
    }

    /// Keeps the newest `keep` backups and drops blobs no entry points at.
    pub fn prune_backups(&mut self, keep: usize) -> Result<usize, StoreError> {
        self.prune_backups_except(keep, None)
    }

    /// Like `prune_backups`, but leaves `pending` alone even though no entry lists it yet.
    fn prune_backups_except(&mut self, keep: usize, pending: Option<&str>) -> Result<usize, StoreError> {
        let mut list = self.backups()?;
        let dropped = list.split_off(keep.min(list.len()));
        if !dropped.is_empty() {
            self.write_backup_list(&list)?;
        }
        let live: HashSet<String> = list.iter().map(|entry| blob_key(entry.id)).collect();
        let mut removed = 0;
        for key in self.local.keys_with_prefix(BACKUP_DATA_PREFIX)? {
            if live.contains(&key) || pending == Some(key.as_str()) {
                continue;
            }
            if self.local.remove_item(&key)? {
                removed += 1;
            }
        }
        info!(kept = list.len(), removed, "backups pruned");
        Ok(removed)
    }

    /// Prepends `entry` to the stored list and returns the entries pushed past `max_backups`.
    fn record_backup(&mut self, entry: &BackupEntry) -> Result<Vec<BackupEntry>, StoreError> {
        match self.prepend_backup(entry) {
            Err(StoreError::QuotaExceeded { required, quota }) => {
                warn!(required, quota, "storage quota exceeded, pruning backups");
                let pending = blob_key(entry.id);
                self.prune_backups_except(self.config.backups_kept_on_cleanup, Some(&pending))?;
                self.prepend_backup(entry)
            }
            other => other,
        }
    }

    fn prepend_backup(&mut self, entry: &BackupEntry) -> Result<Vec<BackupEntry>, StoreError> {
        let mut list = self.backups()?;
        list.insert(0, entry.clone());
        let evicted = if list.len() > self.config.max_backups {
            list.split_off(self.config.max_backups)
        } else {
            Vec::new()
        };
        self.write_backup_list(&list)?;
        Ok(evicted)
    }

    fn write_backup_list(&mut self, list: &[BackupEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(list)?;
        self.local.set_item(BACKUP_LIST_KEY, &json)
    }
}
