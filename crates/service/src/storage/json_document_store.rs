use std::{path::PathBuf, sync::Arc};

use models::StoreDocument;
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Flat-file store holding the whole [`StoreDocument`].
///
/// Every read goes back to disk and every write rewrites the full file.
/// `transaction` serializes read-modify-write sequences within this process;
/// nothing guards against another process editing the same file.
pub struct JsonDocumentStore {
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonDocumentStore {
    /// Open the store at `path`. Creates the file with an empty document if it
    /// is missing and normalizes an existing one so both collections are present.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("create {}: {e}", parent.display())))?;
        }

        let store = Self { file_path, lock: Mutex::new(()) };
        let doc = match fs::try_exists(&store.file_path).await {
            Ok(true) => store.read().await?,
            _ => {
                info!(path = %store.file_path.display(), "store file missing; initializing empty document");
                StoreDocument::default()
            }
        };
        store.write(&doc).await?;
        Ok(Arc::new(store))
    }

    /// Load the full document from disk. Does not take the store lock.
    pub async fn read(&self) -> Result<StoreDocument, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("read {}: {e}", self.file_path.display())))?;
        Ok(StoreDocument::from_slice(&bytes)?)
    }

    /// Rewrite the full document on disk. Does not take the store lock.
    pub async fn write(&self, doc: &StoreDocument) -> Result<(), ServiceError> {
        let data = doc.to_vec_pretty()?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", self.file_path.display())))?;
        debug!(users = doc.users.len(), shoes = doc.shoes.len(), "store written");
        Ok(())
    }

    /// Locked read of the latest durable state.
    pub async fn snapshot(&self) -> Result<StoreDocument, ServiceError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Read, apply `f`, and write back while holding the store lock.
    /// Nothing is written when `f` fails.
    pub async fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T, E>,
        E: From<ServiceError>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.read().await?;
        let out = f(&mut doc)?;
        self.write(&doc).await?;
        Ok(out)
    }
}
