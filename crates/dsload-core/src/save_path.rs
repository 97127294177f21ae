use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{
    error::{LoadError, LoadResult},
    probe::FileProbe,
};

pub const SAVE_EXTENSION: &str = "sav";

/// Derive the save file path for a cartridge image.
///
/// With a custom save directory the file lands in that directory under the
/// image's file name; otherwise it sits next to the image. Either way the
/// extension becomes `.sav`.
pub fn resolve_save_path<P: FileProbe + ?Sized>(
    image: &Path,
    save_dir: Option<&Path>,
    probe: &P,
) -> LoadResult<PathBuf> {
    let mut save = match save_dir {
        Some(dir) => {
            if !probe.dir_exists(dir) {
                return Err(LoadError::SaveDirectoryMissing(dir.to_path_buf()));
            }
            match image.file_name() {
                Some(name) => dir.join(name),
                None => dir.join(image),
            }
        }
        None => image.to_path_buf(),
    };
    save.set_extension(SAVE_EXTENSION);
    Ok(save)
}

/// `<path>.sav`, keeping any existing extension.
pub fn colocated_save_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(SAVE_EXTENSION);
    PathBuf::from(name)
}
