use std::{fs, io, path::Path};

/// Filesystem queries used by verification and save-path resolution.
///
/// Kept behind a trait so tests can observe exactly which artifacts were
/// queried.
pub trait FileProbe {
    /// Size in bytes of the file at `path`.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn dir_exists(&self, path: &Path) -> bool;

    fn file_exists(&self, path: &Path) -> bool {
        self.file_size(path).is_ok()
    }
}

/// [`FileProbe`] backed by `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileProbe;

impl FileProbe for StdFileProbe {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
        }
        Ok(meta.len())
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
