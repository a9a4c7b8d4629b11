use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// What the core needs from wherever uploaded statements live.
pub trait UploadStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn delete(&self, path: &Path) -> Result<()>;
}

/// Uploads on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl UploadStore for FsStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalyzerError::FileNotFound(path.to_path_buf()),
            _ => AnalyzerError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }

    fn delete(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path)?;
        Ok(())
    }
}

/// Deletes the upload when dropped, whatever happened in between.
struct DeleteGuard<'a, S: UploadStore + ?Sized> {
    store: &'a S,
    path: PathBuf,
}

impl<S: UploadStore + ?Sized> Drop for DeleteGuard<'_, S> {
    fn drop(&mut self) {
        match self.store.delete(&self.path) {
            Ok(()) => log::debug!("deleted upload {}", self.path.display()),
            Err(e) => log::warn!("could not delete upload {}: {e}", self.path.display()),
        }
    }
}

/// Run `f` on the bytes of an upload, then delete the upload.
///
/// The delete happens on every path out: read failure, error from `f`, or
/// a panic inside it.
pub fn consume<S, T, F>(store: &S, path: &Path, f: F) -> Result<T>
where
    S: UploadStore + ?Sized,
    F: FnOnce(&[u8]) -> Result<T>,
{
    let _guard = DeleteGuard {
        store,
        path: path.to_path_buf(),
    };
    let bytes = store.read(path)?;
    f(&bytes)
}
