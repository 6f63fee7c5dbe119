//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the directory holding the store file exists.
pub async fn ensure_data_dir(store_path: &Path) -> anyhow::Result<()> {
    let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        debug!(path = %store_path.display(), "store file lives in working directory");
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "data directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_parent() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("shoes_env_{}", uuid::Uuid::new_v4()));
        let file = root.join("nested").join("db.json");
        ensure_data_dir(&file).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_fine() -> anyhow::Result<()> {
        ensure_data_dir(Path::new("db.json")).await
    }
}
