use std::{
    fs,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use crate::{
    core::services::BlobStore,
    errors::{BookError, Result},
    utils::{ensure_dir, PathResolver},
};

/// Blob store backed by plain files under `<data root>/blobs`.
///
/// Keys are slash separated relative paths such as `deals/<id>/invoice.pdf`.
#[derive(Debug, Clone)]
pub struct DirectoryBlobStore {
    root: PathBuf,
}

impl DirectoryBlobStore {
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::blobs_dir_in(&PathResolver::resolve_base(base));
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !safe {
            return Err(BookError::InvalidInput(format!("invalid blob key `{}`", key)));
        }
        Ok(self.root.join(relative))
    }

    fn collect_keys(&self, dir: &Path, keys: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_keys(&path, keys)?;
            } else if let Ok(relative) = path.strip_prefix(&self.root) {
                let key = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                keys.push(key);
            }
        }
        Ok(())
    }

    /// All stored keys in lexical order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        if self.root.exists() {
            self.collect_keys(&self.root, &mut keys)?;
        }
        keys.sort();
        Ok(keys)
    }
}

impl BlobStore for DirectoryBlobStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&path, data)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let doomed: Vec<String> = self
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect();
        for key in &doomed {
            self.delete(key)?;
        }
        if let Some(dir) = prefix.strip_suffix('/') {
            if let Ok(path) = self.path_for(dir) {
                if path.is_dir() {
                    fs::remove_dir_all(&path)?;
                }
            }
        }
        tracing::debug!(prefix, removed = doomed.len(), "blob prefix cleared");
        Ok(doomed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::deal_blob_prefix;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[test]
    fn put_get_and_prefix_delete() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryBlobStore::new(Some(temp.path().to_path_buf())).unwrap();
        let deal = Uuid::new_v4();
        let other = Uuid::new_v4();
        let prefix = deal_blob_prefix(deal);

        store.put(&format!("{prefix}contract.pdf"), b"contract").unwrap();
        store.put(&format!("{prefix}scans/id.png"), b"scan").unwrap();
        store
            .put(&format!("{}keep.txt", deal_blob_prefix(other)), b"keep")
            .unwrap();

        assert_eq!(
            store.get(&format!("{prefix}contract.pdf")).unwrap(),
            Some(b"contract".to_vec())
        );
        assert_eq!(store.delete_prefix(&prefix).unwrap(), 2);
        assert_eq!(store.keys().unwrap(), vec![format!("deals/{other}/keep.txt")]);
        assert!(!store.root().join("deals").join(deal.to_string()).exists());
    }

    #[test]
    fn missing_blobs_read_as_none() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryBlobStore::new(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(store.get("deals/none/file").unwrap(), None);
        store.delete("deals/none/file").unwrap();
        assert_eq!(store.delete_prefix("deals/none/").unwrap(), 0);
    }

    #[test]
    fn keys_cannot_escape_the_root() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryBlobStore::new(Some(temp.path().to_path_buf())).unwrap();
        let err = store.put("../outside", b"x").expect_err("escaping key");
        assert!(matches!(err, BookError::InvalidInput(_)));
    }
}
