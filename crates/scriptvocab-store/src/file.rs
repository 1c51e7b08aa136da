use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use scriptvocab_core::{DictionaryStore, StoreError};
use scriptvocab_types::{RecordsBody, UserId, VocabRecord};
use tokio::fs;
use tokio::sync::Mutex;

/// Bytes kept as-is in file names; everything else is percent-encoded
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Dictionary store keeping one JSON array per user under a data directory
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `user`. Bytes outside `[A-Za-z0-9_-]` are percent-encoded,
    /// so distinct ids get distinct files and none can escape the data directory.
    pub fn user_file(&self, user: &UserId) -> PathBuf {
        let name = utf8_percent_encode(user.as_str(), FILE_NAME);
        self.data_dir.join(format!("{name}.json"))
    }

    async fn load(&self, path: &Path) -> Result<Vec<VocabRecord>, StoreError> {
        match fs::read_to_string(path).await {
            Ok(data) if data.trim().is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_str::<RecordsBody>(&data)?.into_records()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DictionaryStore for JsonFileStore {
    async fn fetch(&self, user: &UserId) -> Result<Vec<VocabRecord>, StoreError> {
        let path = self.user_file(user);
        let records = self.load(&path).await?;
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    async fn remove(&self, user: &UserId, ids: &[String]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let path = self.user_file(user);
        let mut records = self.load(&path).await?;
        let before = records.len();
        records.retain(|record| !ids.iter().any(|id| id == record.id()));

        if records.len() == before {
            tracing::debug!("Nothing to remove for {}", user);
            return Ok(());
        }

        fs::create_dir_all(&self.data_dir).await?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&records)?).await?;
        fs::rename(&tmp, &path).await?;

        tracing::info!("Removed {} records for {}", before - records.len(), user);
        Ok(())
    }
}
