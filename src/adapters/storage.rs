use crate::domain::ports::KeyValueStore;
use crate::utils::error::{Result, UtilError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// 行程內的儲存區，主要用於測試與短暫的 session
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| UtilError::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// 以扁平 TOML table 持久化的 key-value 儲存區
///
/// 整個 table 保存在記憶體中，每次變更都會重寫檔案
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl TomlFileStore {
    /// 開啟（或建立）位於 `path` 的儲存檔；檔案不存在時視為空的儲存區
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| UtilError::StoreError {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(UtilError::IoError(e)),
        };

        tracing::debug!(path = %path.display(), "opened key-value store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = toml::to_string(entries).map_err(|e| UtilError::StoreError {
            message: format!("failed to serialize store: {}", e),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // 先寫暫存檔再 rename，當機時不會留下截斷的檔案
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn mutate<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        if !apply(&mut next) {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| UtilError::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.mutate(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_get_set_delete() {
        let store = MemoryStore::new();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap(), "abc");

        store.delete("token").unwrap();
        assert!(store.get("token").unwrap_err().is_not_found());

        // 刪除不存在的 key 不是錯誤
        store.delete("token").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_toml_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.toml");

        {
            let store = TomlFileStore::open(&path).unwrap();
            store.set("deviceId", "device-1").unwrap();
            store.set("crmid", "crm-1").unwrap();
            store.delete("crmid").unwrap();
        }

        let reopened = TomlFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("deviceId").unwrap(), "device-1");
        assert!(reopened.get("crmid").is_err());
    }

    #[test]
    fn test_toml_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let store = TomlFileStore::open(&path).unwrap();
        assert!(store.get("anything").unwrap_err().is_not_found());
        // 沒有任何寫入時不應建立檔案
        store.delete("anything").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_toml_store_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        assert!(matches!(
            TomlFileStore::open(&path),
            Err(UtilError::StoreError { .. })
        ));
    }
}
