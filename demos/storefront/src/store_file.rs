// demos/storefront/src/store_file.rs

//! JSON-file snapshot store: one flat string-to-string map, rewritten on
//! every put. Plays the role device key-value storage plays for the mobile
//! client: identity bootstrap and checkout handoff, nothing more.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use parking_lot::Mutex;

use cartsync::{CartSyncError, CartSyncResult, SnapshotStore};

pub struct FileStore {
  path: PathBuf,
  entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
  pub fn open(path: PathBuf) -> anyhow::Result<Self> {
    let entries = if path.exists() {
      let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
      serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
      HashMap::new()
    };
    Ok(FileStore { path, entries: Mutex::new(entries) })
  }

  fn persist(&self, entries: &HashMap<String, String>) -> CartSyncResult<()> {
    let text = serde_json::to_string_pretty(entries)
      .map_err(|e| CartSyncError::Internal(format!("store serialization: {e}")))?;
    fs::write(&self.path, text).map_err(|e| CartSyncError::Store {
      key: self.path.display().to_string(),
      source: anyhow!(e),
    })
  }
}

impl SnapshotStore for FileStore {
  fn get(&self, key: &str) -> CartSyncResult<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn put(&self, key: &str, value: &str) -> CartSyncResult<()> {
    let mut entries = self.entries.lock();
    entries.insert(key.to_string(), value.to_string());
    self.persist(&entries)
  }

  fn delete(&self, key: &str) -> CartSyncResult<()> {
    let mut entries = self.entries.lock();
    entries.remove(key);
    self.persist(&entries)
  }
}
