//! Mutex-guarded record store
//!
//! Implements [`AssetRepository`], [`InspectionStore`], [`AuditLog`] and
//! [`ChangeFeed`] over a single [`StoreState`]. The state either lives only
//! in memory or in a JSON file shared by every process that opens it.

mod state;

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use chrono::{DateTime, Utc};
use fd_lock::RwLock;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::models::{
    Asset, AssetId, AssetUpdate, AuditEntry, Inspection, InspectionId, LockPolicy, NewInspection,
};
use crate::core::ports::{AppendOutcome, AssetRepository, AuditLog, ChangeFeed, InspectionStore};

use state::StoreState;

/// Storage backend type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory only; lost on exit
    Memory,
    /// JSON file on disk (default)
    #[default]
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown backend: {s}. Use 'memory' or 'file'")),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// The record store
#[derive(Debug)]
pub struct RecordStore {
    state: Mutex<StoreState>,
    path: Option<PathBuf>,
}

impl RecordStore {
    /// An empty store that lives only in memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            path: None,
        }
    }

    /// Open (or create on first write) a JSON store at `path`
    ///
    /// Several processes may open the same file. Every read reloads it, and
    /// every write reloads, mutates and persists it under an exclusive lock
    /// on a sibling `.lock` file.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let state = load(&path)?;
        debug!("opened store {}", path.display());
        Ok(Self {
            state: Mutex::new(state),
            path: Some(path),
        })
    }

    /// Which backend this store uses
    #[must_use]
    pub const fn backend(&self) -> StorageBackend {
        if self.path.is_some() {
            StorageBackend::File
        } else {
            StorageBackend::Memory
        }
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| anyhow::anyhow!("record store lock poisoned"))
    }

    /// Run a query against the current state
    ///
    /// Writers replace the file by rename, so a reader always sees one
    /// complete snapshot without taking the file lock.
    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> anyhow::Result<T> {
        let mut guard = self.lock()?;
        if let Some(path) = &self.path {
            *guard = load(path)?;
        }
        Ok(f(&guard))
    }

    /// Run a mutation; `f` returns the result and whether anything changed
    ///
    /// Mutations apply to a copy that replaces the live state only after it
    /// has been persisted, so a failed write leaves memory and disk in step.
    /// For the file backend the copy is freshly loaded with the file lock
    /// held, so checks made inside `f` see every other process's writes.
    fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> (T, bool)) -> anyhow::Result<T> {
        let mut guard = self.lock()?;
        let mut file_lock = self.path.as_deref().map(open_lock_file).transpose()?;
        let _exclusive = file_lock
            .as_mut()
            .map(RwLock::write)
            .transpose()
            .context("failed to lock record store")?;

        let mut next = match &self.path {
            Some(path) => load(path)?,
            None => guard.clone(),
        };
        let (out, changed) = f(&mut next);
        if changed {
            next.revision += 1;
            if let Some(path) = &self.path {
                persist(path, &next)?;
            }
        }
        *guard = next;
        Ok(out)
    }
}

fn load(path: &Path) -> anyhow::Result<StoreState> {
    if !path.exists() {
        return Ok(StoreState::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read store {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("corrupt store {}", path.display()))
}

fn open_lock_file(path: &Path) -> anyhow::Result<RwLock<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let lock_path = path.with_extension("json.lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("failed to open {}", lock_path.display()))?;
    Ok(RwLock::new(file))
}

fn persist(path: &Path, state: &StoreState) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

impl AssetRepository for RecordStore {
    fn get(&self, id: AssetId) -> anyhow::Result<Option<Asset>> {
        self.read(|s| s.asset(id).cloned())
    }

    fn find_by_serial(&self, serial: &str) -> anyhow::Result<Option<Asset>> {
        self.read(|s| s.asset_by_serial(serial).cloned())
    }

    fn list(&self) -> anyhow::Result<Vec<Asset>> {
        self.read(|s| s.assets.clone())
    }

    fn insert(&self, asset: &Asset) -> anyhow::Result<bool> {
        self.write(|s| {
            let inserted = s.insert_asset(asset);
            (inserted, inserted)
        })
    }

    fn deactivate(&self, id: AssetId) -> anyhow::Result<bool> {
        self.write(|s| {
            let changed = s.deactivate(id);
            (changed, changed)
        })
    }
}

impl InspectionStore for RecordStore {
    fn inspection(&self, id: InspectionId) -> anyhow::Result<Option<Inspection>> {
        self.read(|s| s.inspection(id).cloned())
    }

    fn latest_inspection(&self, asset_id: AssetId) -> anyhow::Result<Option<Inspection>> {
        self.read(|s| s.latest_inspection(asset_id).cloned())
    }

    fn history(&self, asset_id: AssetId) -> anyhow::Result<Vec<Inspection>> {
        self.read(|s| s.history(asset_id))
    }

    fn recorded_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Inspection>> {
        self.read(|s| {
            s.inspections
                .iter()
                .filter(|i| i.inspection_date >= start && i.inspection_date < end)
                .cloned()
                .collect()
        })
    }

    fn append_unless_locked(
        &self,
        inspection: NewInspection,
        policy: LockPolicy,
        update: &AssetUpdate,
    ) -> anyhow::Result<AppendOutcome> {
        self.write(|s| {
            let outcome = s.append_unless_locked(inspection, policy, update);
            let changed = matches!(outcome, AppendOutcome::Appended(_));
            (outcome, changed)
        })
    }
}

impl AuditLog for RecordStore {
    fn record(&self, entry: &AuditEntry) -> anyhow::Result<()> {
        self.write(|s| {
            s.audit.push(entry.clone());
            ((), true)
        })
    }

    fn recent(&self, limit: usize) -> anyhow::Result<Vec<AuditEntry>> {
        self.read(|s| s.recent_audit(limit))
    }
}

impl ChangeFeed for RecordStore {
    fn revision(&self) -> u64 {
        self.read(|s| s.revision).unwrap_or_else(|e| {
            warn!("failed to reload store, reporting cached revision: {e:#}");
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .revision
        })
    }
}
