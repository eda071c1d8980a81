//! Storage backends for articles and resource files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SourceError;

/// A flat namespace of files addressed by name.
pub trait Storage {
    /// Where `name` lives in this backend.
    fn path(&self, name: &str) -> PathBuf;

    /// Whether `name` exists. Missing files are a normal `false`.
    fn exists(&self, name: &str) -> bool;

    /// Read `name` as UTF-8 text.
    ///
    /// # Errors
    /// Returns [`SourceError::NotFound`] if the file is missing, or
    /// [`SourceError::Read`] for any other I/O or decoding failure.
    fn read_text(&self, name: &str) -> Result<String, SourceError>;

    /// Size in bytes, if the file exists.
    fn size(&self, name: &str) -> Option<u64>;

    /// Copy `name` into `dest_dir`, keeping its file name.
    ///
    /// # Errors
    /// Returns an error if the source is missing or the copy fails.
    fn copy_to(&self, name: &str, dest_dir: &Path) -> Result<PathBuf, SourceError>;
}

/// Files in a single directory on disk.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn checked_path(&self, name: &str) -> Result<PathBuf, SourceError> {
        if is_plain_name(name) {
            Ok(self.root.join(name))
        } else {
            Err(SourceError::InvalidName(name.to_owned()))
        }
    }
}

/// Names must stay inside the storage root.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some_and(|f| f == name)
}

impl Storage for DirStorage {
    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn exists(&self, name: &str) -> bool {
        let Ok(path) = self.checked_path(name) else {
            tracing::warn!(name, "rejected file name");
            return false;
        };
        match fs::metadata(&path) {
            Ok(meta) => meta.is_file(),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "file does not exist");
                false
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to check file");
                false
            }
        }
    }

    fn read_text(&self, name: &str) -> Result<String, SourceError> {
        let path = self.checked_path(name)?;
        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SourceError::NotFound { path }
            } else {
                SourceError::Read { path, source }
            }
        })
    }

    fn size(&self, name: &str) -> Option<u64> {
        let path = self.checked_path(name).ok()?;
        fs::metadata(path)
            .ok()
            .filter(fs::Metadata::is_file)
            .map(|meta| meta.len())
    }

    fn copy_to(&self, name: &str, dest_dir: &Path) -> Result<PathBuf, SourceError> {
        let from = self.checked_path(name)?;
        if !from.is_file() {
            return Err(SourceError::NotFound { path: from });
        }
        let to = dest_dir.join(name);
        fs::create_dir_all(dest_dir)
            .and_then(|()| fs::copy(&from, &to))
            .map_err(|source| SourceError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exists_distinguishes_present_and_missing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# A").unwrap();
        let storage = DirStorage::new(dir.path());

        assert!(storage.exists("a.md"));
        assert!(!storage.exists("b.md"));
    }

    #[test]
    fn test_directories_do_not_count_as_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let storage = DirStorage::new(dir.path());

        assert!(!storage.exists("sub"));
        assert_eq!(storage.size("sub"), None);
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = DirStorage::new(dir.path());

        let err = storage.read_text("missing.md").unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[test]
    fn test_read_invalid_utf8_is_read_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bin.md"), [0xff, 0xfe, 0x00]).unwrap();
        let storage = DirStorage::new(dir.path());

        let err = storage.read_text("bin.md").unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }), "unexpected error: {err}");
    }

    #[test]
    fn test_names_cannot_escape_root() {
        let dir = tempdir().unwrap();
        let storage = DirStorage::new(dir.path().join("inner"));
        std::fs::write(dir.path().join("secret.md"), "x").unwrap();

        assert!(!storage.exists("../secret.md"));
        assert!(matches!(
            storage.read_text("../secret.md"),
            Err(SourceError::InvalidName(_))
        ));
        assert!(!storage.exists(".."));
    }

    #[test]
    fn test_copy_to_creates_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("files");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("pack.zip"), b"PK").unwrap();
        let storage = DirStorage::new(&src);

        let dest = dir.path().join("downloads");
        let copied = storage.copy_to("pack.zip", &dest).unwrap();
        assert_eq!(copied, dest.join("pack.zip"));
        assert_eq!(std::fs::read(copied).unwrap(), b"PK");
    }

    #[test]
    fn test_size_reports_bytes() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("f.bin"), [0u8; 10]).unwrap();
        let storage = DirStorage::new(dir.path());

        assert_eq!(storage.size("f.bin"), Some(10));
        assert_eq!(storage.size("nope.bin"), None);
    }
}
