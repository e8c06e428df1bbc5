/// In-process capability implementations
///
/// Nothing here survives the process. Useful as the storage of a browser
/// session and as test fixtures.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

use crate::capability::filesystem::strip_data_url_prefix;
use crate::capability::{Directory, FileStorage, Preferences, ReadFileResult, WriteFileResult};
use crate::error::CapabilityError;

/// File storage keyed by URI. Files written into a directory get a
/// `memory://<directory>/<path>` URI; reads without a directory use the key as given.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: Mutex<HashMap<String, String>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &str, directory: Option<Directory>) -> String {
        match directory {
            Some(dir) => format!("memory://{}/{}", dir.name(), path),
            None => path.to_string(),
        }
    }

    /// Seed a base64 payload
    pub async fn insert(&self, path: &str, directory: Option<Directory>, data: &str) {
        self.files
            .lock()
            .await
            .insert(Self::key(path, directory), data.to_string());
    }

    pub async fn contains(&self, path: &str, directory: Option<Directory>) -> bool {
        self.files
            .lock()
            .await
            .contains_key(&Self::key(path, directory))
    }

    pub async fn len(&self) -> usize {
        self.files.lock().await.len()
    }
}

#[async_trait]
impl FileStorage for MemoryFilesystem {
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<WriteFileResult, CapabilityError> {
        let uri = Self::key(path, Some(directory));
        self.files
            .lock()
            .await
            .insert(uri.clone(), strip_data_url_prefix(data).to_string());
        Ok(WriteFileResult { uri })
    }

    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<ReadFileResult, CapabilityError> {
        let key = Self::key(path, directory);
        self.files
            .lock()
            .await
            .get(&key)
            .map(|data| ReadFileResult { data: data.clone() })
            .ok_or(CapabilityError::NotFound(key))
    }

    async fn delete_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<(), CapabilityError> {
        let key = Self::key(path, directory);
        match self.files.lock().await.remove(&key) {
            Some(_) => Ok(()),
            None => Err(CapabilityError::NotFound(key)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Preferences for MemoryPreferences {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CapabilityError> {
        self.values.lock().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CapabilityError> {
        Ok(self.values.lock().await.keys().cloned().collect())
    }

    async fn clear(&self) -> Result<(), CapabilityError> {
        self.values.lock().await.clear();
        Ok(())
    }
}
