//! Resource file store: a small file manager rooted at one directory.
//!
//! Every path handed in is relative to the root. Absolute paths and `..`
//! components are rejected before touching the filesystem.

use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Invalid resource path: {0}")]
    InvalidPath(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("Directory is not empty: {0}")]
    NotEmpty(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },
}

impl ResourceError {
    fn from_io(operation: &'static str, path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_string()),
            _ => Self::Io {
                operation,
                message: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub name: String,
    /// Relative to the store root, `/`-separated.
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceListing {
    pub path: String,
    pub parent: Option<String>,
    pub entries: Vec<ResourceEntry>,
}

/// Validated relative path inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RelativePath {
    parts: Vec<String>,
}

impl RelativePath {
    fn parse(raw: &str) -> Result<Self, ResourceError> {
        let path = Path::new(raw);
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| ResourceError::InvalidPath(raw.to_string()))?;
                    parts.push(part.to_string());
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ResourceError::InvalidPath(raw.to_string()));
                }
            }
        }
        Ok(Self { parts })
    }

    fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    fn display(&self) -> String {
        self.parts.join("/")
    }

    fn parent(&self) -> Option<String> {
        if self.is_root() {
            return None;
        }
        Some(self.parts[..self.parts.len() - 1].join("/"))
    }

    fn child(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}/{}", self.display(), name)
        }
    }

    fn under(&self, root: &Path) -> PathBuf {
        let mut full = root.to_path_buf();
        full.extend(&self.parts);
        full
    }
}

pub struct ResourceStore {
    root: PathBuf,
}

impl ResourceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), ResourceError> {
        let shown = self.root.display().to_string();
        match fs::create_dir_all(&self.root).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(ResourceError::from_io("resources.ensure_root", &shown, e)),
        }

        let metadata = fs::metadata(&self.root)
            .await
            .map_err(|e| ResourceError::from_io("resources.ensure_root", &shown, e))?;
        if !metadata.is_dir() {
            return Err(ResourceError::NotADirectory(shown));
        }
        tracing::info!(root = %shown, "Resource directory ready");
        Ok(())
    }

    pub async fn list(&self, path: &str) -> Result<ResourceListing, ResourceError> {
        let rel = RelativePath::parse(path)?;
        let full = rel.under(&self.root);
        let shown = rel.display();

        let metadata = fs::metadata(&full)
            .await
            .map_err(|e| ResourceError::from_io("resources.list", &shown, e))?;
        if !metadata.is_dir() {
            return Err(ResourceError::NotADirectory(shown));
        }

        let mut reader = fs::read_dir(&full)
            .await
            .map_err(|e| ResourceError::from_io("resources.list", &shown, e))?;
        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| ResourceError::from_io("resources.list", &shown, e))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(dir = %shown, "Skipping resource with non UTF-8 name");
                continue;
            };
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| ResourceError::from_io("resources.list", &shown, e))?;
            entries.push(ResourceEntry {
                path: rel.child(&name),
                name,
                is_dir: metadata.is_dir(),
                size: if metadata.is_dir() { 0 } else { metadata.len() },
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));

        Ok(ResourceListing {
            parent: rel.parent(),
            path: shown,
            entries,
        })
    }

    pub async fn read(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let rel = RelativePath::parse(path)?;
        let full = rel.under(&self.root);
        let shown = rel.display();

        let metadata = fs::metadata(&full)
            .await
            .map_err(|e| ResourceError::from_io("resources.read", &shown, e))?;
        if !metadata.is_file() {
            return Err(ResourceError::NotAFile(shown));
        }

        fs::read(&full)
            .await
            .map_err(|e| ResourceError::from_io("resources.read", &shown, e))
    }

    /// Create or overwrite a file. The parent directory must exist.
    pub async fn write(&self, path: &str, data: &[u8]) -> Result<ResourceEntry, ResourceError> {
        let rel = RelativePath::parse(path)?;
        if rel.is_root() {
            return Err(ResourceError::InvalidPath(path.to_string()));
        }
        let full = rel.under(&self.root);
        let shown = rel.display();

        if let Ok(existing) = fs::metadata(&full).await {
            if existing.is_dir() {
                return Err(ResourceError::NotAFile(shown));
            }
        }

        fs::write(&full, data)
            .await
            .map_err(|e| ResourceError::from_io("resources.write", &shown, e))?;
        tracing::debug!(path = %shown, bytes = data.len(), "Resource written");

        self.entry(&rel).await
    }

    pub async fn mkdir(&self, path: &str) -> Result<ResourceEntry, ResourceError> {
        let rel = RelativePath::parse(path)?;
        if rel.is_root() {
            return Err(ResourceError::InvalidPath(path.to_string()));
        }
        let shown = rel.display();

        fs::create_dir(rel.under(&self.root))
            .await
            .map_err(|e| ResourceError::from_io("resources.mkdir", &shown, e))?;
        tracing::debug!(path = %shown, "Resource directory created");

        self.entry(&rel).await
    }

    pub async fn rename(&self, from: &str, to: &str) -> Result<ResourceEntry, ResourceError> {
        let from_rel = RelativePath::parse(from)?;
        let to_rel = RelativePath::parse(to)?;
        if from_rel.is_root() || to_rel.is_root() {
            return Err(ResourceError::InvalidPath(format!("{} -> {}", from, to)));
        }
        let source = from_rel.under(&self.root);
        let target = to_rel.under(&self.root);

        fs::metadata(&source)
            .await
            .map_err(|e| ResourceError::from_io("resources.rename", &from_rel.display(), e))?;
        if fs::metadata(&target).await.is_ok() {
            return Err(ResourceError::AlreadyExists(to_rel.display()));
        }

        fs::rename(&source, &target)
            .await
            .map_err(|e| ResourceError::from_io("resources.rename", &to_rel.display(), e))?;
        tracing::debug!(from = %from_rel.display(), to = %to_rel.display(), "Resource renamed");

        self.entry(&to_rel).await
    }

    /// Delete a file or an empty directory.
    pub async fn delete(&self, path: &str) -> Result<(), ResourceError> {
        let rel = RelativePath::parse(path)?;
        if rel.is_root() {
            return Err(ResourceError::InvalidPath(path.to_string()));
        }
        let full = rel.under(&self.root);
        let shown = rel.display();

        let metadata = fs::metadata(&full)
            .await
            .map_err(|e| ResourceError::from_io("resources.delete", &shown, e))?;

        if metadata.is_dir() {
            let mut reader = fs::read_dir(&full)
                .await
                .map_err(|e| ResourceError::from_io("resources.delete", &shown, e))?;
            let has_children = reader
                .next_entry()
                .await
                .map_err(|e| ResourceError::from_io("resources.delete", &shown, e))?
                .is_some();
            if has_children {
                return Err(ResourceError::NotEmpty(shown));
            }
            fs::remove_dir(&full)
                .await
                .map_err(|e| ResourceError::from_io("resources.delete", &shown, e))?;
        } else {
            fs::remove_file(&full)
                .await
                .map_err(|e| ResourceError::from_io("resources.delete", &shown, e))?;
        }

        tracing::debug!(path = %shown, "Resource deleted");
        Ok(())
    }

    async fn entry(&self, rel: &RelativePath) -> Result<ResourceEntry, ResourceError> {
        let shown = rel.display();
        let metadata = fs::metadata(rel.under(&self.root))
            .await
            .map_err(|e| ResourceError::from_io("resources.stat", &shown, e))?;
        Ok(ResourceEntry {
            name: rel.parts.last().cloned().unwrap_or_default(),
            path: shown,
            is_dir: metadata.is_dir(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, ResourceStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ResourceStore::new(dir.path().join("resources"));
        store.ensure_root().await.expect("root");
        (dir, store)
    }

    #[test]
    fn relative_paths_reject_escapes() {
        assert!(RelativePath::parse("../etc/passwd").is_err());
        assert!(RelativePath::parse("maps/../../secret").is_err());
        assert!(RelativePath::parse("/etc/passwd").is_err());
        assert!(RelativePath::parse("").expect("root").is_root());
        assert_eq!(
            RelativePath::parse("./maps//europe.png").expect("path").display(),
            "maps/europe.png"
        );
    }

    #[tokio::test]
    async fn ensure_root_tolerates_existing_directory() {
        let (_dir, store) = store().await;
        store.ensure_root().await.expect("second call");
    }

    #[tokio::test]
    async fn ensure_root_rejects_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("resources");
        std::fs::write(&file, b"not a dir").expect("write");

        let err = ResourceStore::new(file).ensure_root().await.expect_err("file root");
        assert!(matches!(
            err,
            ResourceError::NotADirectory(_) | ResourceError::AlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn list_puts_directories_first() {
        let (_dir, store) = store().await;
        store.write("b.txt", b"bee").await.expect("write");
        store.write("a.txt", b"a").await.expect("write");
        store.mkdir("zeta").await.expect("mkdir");

        let listing = store.list("").await.expect("list");
        let names: Vec<_> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "a.txt", "b.txt"]);
        assert_eq!(listing.parent, None);
        assert_eq!(listing.entries[2].size, 3);
        assert!(listing.entries[0].is_dir);
    }

    #[tokio::test]
    async fn nested_paths_round_trip() {
        let (_dir, store) = store().await;
        store.mkdir("maps").await.expect("mkdir");
        let entry = store.write("maps/rome.txt", b"SPQR").await.expect("write");
        assert_eq!(entry.path, "maps/rome.txt");
        assert_eq!(entry.name, "rome.txt");

        let listing = store.list("maps").await.expect("list");
        assert_eq!(listing.parent.as_deref(), Some(""));
        assert_eq!(listing.entries[0].path, "maps/rome.txt");

        assert_eq!(store.read("maps/rome.txt").await.expect("read"), b"SPQR");
    }

    #[tokio::test]
    async fn writing_into_a_missing_directory_is_not_found() {
        let (_dir, store) = store().await;
        let err = store.write("missing/file.txt", b"x").await.expect_err("no parent");
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn rename_refuses_to_overwrite() {
        let (_dir, store) = store().await;
        store.write("old.txt", b"1").await.expect("write");
        store.write("taken.txt", b"2").await.expect("write");

        let err = store.rename("old.txt", "taken.txt").await.expect_err("taken");
        assert!(matches!(err, ResourceError::AlreadyExists(_)));

        let entry = store.rename("old.txt", "new.txt").await.expect("rename");
        assert_eq!(entry.name, "new.txt");
        assert!(matches!(
            store.read("old.txt").await,
            Err(ResourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_only_removes_empty_directories() {
        let (_dir, store) = store().await;
        store.mkdir("art").await.expect("mkdir");
        store.write("art/flag.png", b"png").await.expect("write");

        let err = store.delete("art").await.expect_err("not empty");
        assert!(matches!(err, ResourceError::NotEmpty(_)));

        store.delete("art/flag.png").await.expect("delete file");
        store.delete("art").await.expect("delete dir");
        assert!(store.list("").await.expect("list").entries.is_empty());
    }

    #[tokio::test]
    async fn traversal_is_rejected_before_io() {
        let (_dir, store) = store().await;
        for path in ["../outside.txt", "/etc/passwd"] {
            assert!(matches!(
                store.read(path).await,
                Err(ResourceError::InvalidPath(_))
            ));
            assert!(matches!(
                store.write(path, b"x").await,
                Err(ResourceError::InvalidPath(_))
            ));
        }
        assert!(matches!(
            store.delete("").await,
            Err(ResourceError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn reading_a_directory_is_rejected() {
        let (_dir, store) = store().await;
        store.mkdir("dir").await.expect("mkdir");
        assert!(matches!(
            store.read("dir").await,
            Err(ResourceError::NotAFile(_))
        ));
    }
}
