//! Resolve the directory that holds the running executable.
//!
//! Inputs are read from and outputs written to this directory. There is no
//! fallback: if it cannot be determined the run aborts before any work.

use crate::error::Pdf2JpegError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory containing the running binary.
///
/// Outside Windows, symlinks are resolved when possible so a linked binary
/// works on the folder it actually lives in.
pub fn executable_dir() -> Result<PathBuf, Pdf2JpegError> {
    let exe = std::env::current_exe().map_err(|e| Pdf2JpegError::ExecutableDirUnavailable {
        detail: e.to_string(),
    })?;
    let exe = resolve_links(exe);

    let dir = parent_dir(&exe)?;
    debug!("Execution directory: {}", dir.display());
    Ok(dir)
}

#[cfg(not(windows))]
fn resolve_links(exe: PathBuf) -> PathBuf {
    std::fs::canonicalize(&exe).unwrap_or(exe)
}

// `canonicalize` returns verbatim `\\?\C:\...` paths on Windows, and those
// would leak into every printed path. `current_exe` is already absolute there.
#[cfg(windows)]
fn resolve_links(exe: PathBuf) -> PathBuf {
    exe
}

fn parent_dir(exe: &Path) -> Result<PathBuf, Pdf2JpegError> {
    match exe.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => Err(Pdf2JpegError::ExecutableDirUnavailable {
            detail: format!("'{}' has no parent directory", exe.display()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_dir_is_an_existing_directory() {
        let dir = executable_dir().expect("test binary has a directory");
        assert!(dir.is_dir(), "{} is not a directory", dir.display());
        assert!(dir.is_absolute());
    }

    #[test]
    fn executable_dir_has_no_verbatim_prefix() {
        let dir = executable_dir().unwrap();
        let shown = dir.display().to_string();
        assert!(!shown.starts_with(r"\\?\"), "got: {shown}");
    }

    #[test]
    fn parent_of_bare_name_is_rejected() {
        let err = parent_dir(Path::new("pdf2jpeg")).unwrap_err();
        assert!(matches!(err, Pdf2JpegError::ExecutableDirUnavailable { .. }));
    }

    #[test]
    fn parent_of_root_is_rejected() {
        assert!(parent_dir(Path::new("/")).is_err());
    }
}
