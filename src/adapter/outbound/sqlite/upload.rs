//! Scratch copies of user-supplied database files.
//!
//! Generated queries run unmodified, so they may write. They always run
//! against a private temporary copy that is removed when the
//! [`UploadedDatabase`] is dropped, whether or not the request succeeded.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::Result;

/// A temporary `.sqlite` file owned for the duration of one request.
#[derive(Debug)]
pub struct UploadedDatabase {
    file: NamedTempFile,
}

impl UploadedDatabase {
    /// Write uploaded bytes to a fresh temporary file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or written.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut file = scratch_file()?;
        file.write_all(bytes)?;
        file.flush()?;
        debug!(path = %file.path().display(), size = bytes.len(), "Upload saved");
        Ok(Self { file })
    }

    /// Copy an existing database file into a fresh temporary file.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be read or the copy fails.
    pub fn copy_from(source: &Path) -> Result<Self> {
        let file = scratch_file()?;
        let size = std::fs::copy(source, file.path())?;
        debug!(
            source = %source.display(),
            path = %file.path().display(),
            size,
            "Database copied"
        );
        Ok(Self { file })
    }

    /// Location of the scratch copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

fn scratch_file() -> Result<NamedTempFile> {
    Ok(Builder::new().prefix("askdb-").suffix(".sqlite").tempfile()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_writes_contents_with_sqlite_suffix() {
        let upload = UploadedDatabase::from_bytes(b"not really a database").unwrap();
        assert_eq!(upload.path().extension().unwrap(), "sqlite");
        assert_eq!(std::fs::read(upload.path()).unwrap(), b"not really a database");
    }

    #[test]
    fn file_is_removed_on_drop() {
        let upload = UploadedDatabase::from_bytes(b"").unwrap();
        let path = upload.path().to_path_buf();
        assert!(path.exists());
        drop(upload);
        assert!(!path.exists());
    }

    #[test]
    fn copy_leaves_source_untouched() {
        let source = UploadedDatabase::from_bytes(b"original").unwrap();
        let copy = UploadedDatabase::copy_from(source.path()).unwrap();

        std::fs::write(copy.path(), b"changed").unwrap();

        assert_ne!(copy.path(), source.path());
        assert_eq!(std::fs::read(source.path()).unwrap(), b"original");
    }

    #[test]
    fn copy_from_missing_file_fails() {
        let result = UploadedDatabase::copy_from(Path::new("/definitely/not/here.sqlite"));
        assert!(result.is_err());
    }
}
