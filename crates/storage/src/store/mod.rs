#![forbid(unsafe_code)]

mod backups;
mod config;
mod error;
mod exchange;
mod families;
mod guide;
mod local;
mod persons;
mod queries;

pub use backups::BackupEntry;
pub use config::*;
pub use error::StoreError;
pub use exchange::ImportSummary;
pub use guide::GuideTracker;
pub use local::LocalStorage;
pub use queries::{SearchHit, StoreStatistics};

use ln_core::dates;
use ln_core::ids::{FamilyId, IdAllocator, PersonId};
use ln_core::model::Family;
use ln_core::tree;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

pub const DATA_VERSION: &str = "1.0.0";
pub const DB_KEY: &str = "family_tree_database";
pub const CORRUPT_DB_KEY: &str = "family_tree_database.corrupt";
pub const BACKUP_LIST_KEY: &str = "family_tree_backup_list";
pub const BACKUP_DATA_PREFIX: &str = "family_tree_backup_data_";
pub const GUIDE_PROGRESS_KEY: &str = "family_tree_guide_progress";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseRecord<'a> {
    families: &'a [Family],
    last_saved: String,
    version: &'static str,
}

#[derive(Deserialize)]
struct StoredDatabase {
    #[serde(default)]
    families: Vec<Family>,
}

/// In-memory family list, written through to local storage after every mutation.
#[derive(Debug)]
pub struct FamilyStore {
    local: LocalStorage,
    families: Vec<Family>,
    ids: IdAllocator,
    config: StoreConfig,
    storage_dir: Option<PathBuf>,
}

impl FamilyStore {
    pub fn open(storage_dir: impl AsRef<Path>, config: StoreConfig) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        let local = LocalStorage::open(&storage_dir, config.quota_bytes)?;
        let mut store = Self::with_local(local, config)?;
        store.storage_dir = Some(storage_dir);
        Ok(store)
    }

    pub fn open_in_memory(config: StoreConfig) -> Result<Self, StoreError> {
        let local = LocalStorage::open_in_memory(config.quota_bytes)?;
        Self::with_local(local, config)
    }

    fn with_local(mut local: LocalStorage, config: StoreConfig) -> Result<Self, StoreError> {
        let families = load_families(&mut local)?;
        let mut ids = IdAllocator::new();
        for family in &families {
            observe_family(&mut ids, family);
        }
        info!(families = families.len(), "family store opened");
        Ok(Self {
            local,
            families,
            ids,
            config,
            storage_dir: None,
        })
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn local(&self) -> &LocalStorage {
        &self.local
    }

    /// Guide progress lives in the same local storage as the families.
    pub fn guide(&mut self) -> Result<GuideTracker<'_>, StoreError> {
        GuideTracker::load(&mut self.local)
    }

    fn now(&self) -> OffsetDateTime {
        dates::now_utc()
    }

    fn next_family_id(&mut self) -> FamilyId {
        let now_ms = dates::now_ms(self.now());
        self.ids.next_family(now_ms)
    }

    fn next_person_id(&mut self) -> PersonId {
        let now_ms = dates::now_ms(self.now());
        self.ids.next_person(now_ms)
    }

    fn family_index(&self, id: FamilyId) -> Result<usize, StoreError> {
        self.families
            .iter()
            .position(|family| family.id == id)
            .ok_or(StoreError::UnknownFamily(id))
    }

    fn family_ref(&self, id: FamilyId) -> Result<&Family, StoreError> {
        let index = self.family_index(id)?;
        Ok(&self.families[index])
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let record = DatabaseRecord {
            families: &self.families,
            last_saved: dates::to_rfc3339(dates::now_utc()),
            version: DATA_VERSION,
        };
        let json = serde_json::to_string(&record)?;
        self.write_with_cleanup(DB_KEY, &json)?;
        debug!(bytes = json.len(), families = self.families.len(), "families persisted");
        Ok(())
    }

    /// Writes an item; on quota exhaustion drops old backups and tries once more.
    fn write_with_cleanup(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self.local.set_item(key, value) {
            Err(StoreError::QuotaExceeded { required, quota }) => {
                warn!(key, required, quota, "storage quota exceeded, pruning backups");
                self.prune_backups(self.config.backups_kept_on_cleanup)?;
                self.local.set_item(key, value)
            }
            other => other,
        }
    }
}

fn load_families(local: &mut LocalStorage) -> Result<Vec<Family>, StoreError> {
    let Some(raw) = local.get_item(DB_KEY)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<StoredDatabase>(&raw) {
        Ok(stored) => {
            let mut families = stored.families;
            for family in families.iter_mut() {
                tree::relink_parents(&mut family.members);
            }
            Ok(families)
        }
        Err(err) => {
            warn!(error = %err, "stored family database is unreadable, starting empty");
            if let Err(err) = local.set_item(CORRUPT_DB_KEY, &raw) {
                warn!(error = %err, "could not keep a copy of the unreadable database");
            }
            Ok(Vec::new())
        }
    }
}

fn observe_family(ids: &mut IdAllocator, family: &Family) {
    ids.observe(family.id.get());
    for visit in tree::walk(&family.members) {
        ids.observe(visit.person.id.get());
    }
}

fn touch(family: &mut Family, now: OffsetDateTime) {
    family.updated_at = now;
}

fn count_persons(families: &[Family]) -> usize {
    families
        .iter()
        .map(|family| tree::count(&family.members))
        .sum()
}
