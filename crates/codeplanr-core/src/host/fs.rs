//! File system access.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Asynchronous file system operations used by step execution.
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Writes `contents`, replacing any existing file.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Creates `path` and all missing parents.
    async fn mkdir_recursive(&self, path: &Path) -> io::Result<()>;

    /// Lists the direct children of `path` in no particular order.
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

/// The local disk, via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn mkdir_recursive(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(path).await?;
        while let Some(entry) = dir.next_entry().await? {
            entries.push(DirEntry {
                path: entry.path(),
                is_dir: entry.file_type().await?.is_dir(),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_local_file_system_operations() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let fs = LocalFileSystem;
        let dir = temp_dir.path().join("a").join("b");
        let file = dir.join("c.txt");

        assert!(!fs.exists(&file).await);
        fs.mkdir_recursive(&dir).await.expect("Failed to create dirs");
        fs.write(&file, "hello").await.expect("Failed to write");
        assert!(fs.exists(&file).await);
        assert_eq!(fs.read(&file).await.expect("Failed to read"), "hello");

        let entries = fs.list_dir(temp_dir.path()).await.expect("Failed to list");
        assert_eq!(
            entries,
            vec![DirEntry {
                path: temp_dir.path().join("a"),
                is_dir: true,
            }]
        );
        let entries = fs.list_dir(&dir).await.expect("Failed to list");
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_dir);
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = LocalFileSystem
            .read(&temp_dir.path().join("missing.rs"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
