//! `.plcson` files on the local filesystem.

use std::path::Path;

use async_trait::async_trait;
use plcm_persistence::{ProjectFile, load_project_async, save_project_async};

use super::ProjectStorage;
use crate::error::Result;

/// [`ProjectStorage`] backed by `plcm-persistence`.
///
/// File I/O runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

#[async_trait]
impl ProjectStorage for FileStorage {
    async fn load(&self, path: &Path) -> Result<ProjectFile> {
        Ok(load_project_async(path.to_path_buf()).await?)
    }

    async fn save(&self, project: ProjectFile, path: &Path) -> Result<()> {
        save_project_async(project, path.to_path_buf()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use plcm_persistence::PersistenceError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("line.plcson");

        FileStorage.save(ProjectFile::new(), &path).await.unwrap();
        let loaded = FileStorage.load(&path).await.unwrap();
        assert!(loaded.plcs.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileStorage
            .load(&dir.path().join("absent.plcson"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Persistence(PersistenceError::File { .. })
        ));
    }
}
