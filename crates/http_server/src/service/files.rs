use std::path::{Component, Path, PathBuf};

use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("no storage directory configured")]
    NotConfigured,
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("{0:?} resolves outside the storage directory")]
    OutsideRoot(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The directory `/files/<name>` reads from and writes to
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, which must be an existing directory
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(root)?;
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// Resolves a client supplied name to a path inside the root.
    ///
    /// The name must be a single plain path component. If the target already exists it is
    /// canonicalized, so a symlink pointing out of the root is rejected as well. A dangling
    /// symlink can't be canonicalized and is always rejected, since writing through it would
    /// create its target wherever it points.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, FileStoreError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(FileStoreError::InvalidName(name.to_owned())),
        }

        let joined = self.root.join(name);
        let resolved = match tokio::fs::canonicalize(&joined).await {
            Ok(path) => path,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                match tokio::fs::symlink_metadata(&joined).await {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        return Err(FileStoreError::OutsideRoot(name.to_owned()));
                    }
                    _ => joined,
                }
            }
            Err(err) => return Err(err.into()),
        };
        if !resolved.starts_with(&self.root) {
            return Err(FileStoreError::OutsideRoot(name.to_owned()));
        }
        Ok(resolved)
    }

    pub async fn read(&self, name: &str) -> Result<Bytes, FileStoreError> {
        let path = self.resolve(name).await?;
        Ok(tokio::fs::read(path).await?.into())
    }

    /// Creates or overwrites `name` with `contents`
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileStoreError> {
        let path = self.resolve(name).await?;
        tokio::fs::write(path, contents).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.write("a.txt", b"first").await.unwrap();
        assert_eq!(&store.read("a.txt").await.unwrap()[..], b"first");

        store.write("a.txt", b"second").await.unwrap();
        assert_eq!(&store.read("a.txt").await.unwrap()[..], b"second");
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.read("missing.txt").await,
            Err(FileStoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[tokio::test]
    async fn rejects_names_that_leave_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        for name in ["..", ".", "", "a/b", "/etc/passwd"] {
            assert!(
                matches!(store.resolve(name).await, Err(FileStoreError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rejects_symlink_out_of_root() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret"), b"hidden").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret"), dir.path().join("link")).unwrap();

        let store = FileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.read("link").await,
            Err(FileStoreError::OutsideRoot(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rejects_dangling_symlink() {
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("not-yet");

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

        let store = FileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.write("link", b"escaped").await,
            Err(FileStoreError::OutsideRoot(_))
        ));
        assert!(matches!(
            store.read("link").await,
            Err(FileStoreError::OutsideRoot(_))
        ));
        assert!(!target.exists());
    }

    #[test]
    fn root_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"").unwrap();

        assert!(FileStore::new(&file).is_err());
        assert!(FileStore::new(dir.path().join("nope")).is_err());
    }
}
