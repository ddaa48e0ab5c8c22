//! Literal file edits applied to the generated project
//!
//! All operations are plain `std::fs` with errors mapped to the crate's
//! error kinds. Substitution is literal, never regex, and a file without the
//! search text is left byte-identical.

use std::fs;
use std::path::Path;

use crate::error::{ComposeError, Result};

/// Replace every literal occurrence of `search` with `replacement` in `path`.
///
/// No-op when `search` does not occur; the file is still rewritten only if
/// the content changed.
pub fn replace_in_file<P: AsRef<Path>>(search: &str, replacement: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ComposeError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if !content.contains(search) {
        return Ok(());
    }

    let updated = content.replace(search, replacement);
    fs::write(path, updated).map_err(|e| ComposeError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Byte-for-byte copy of `source` to `destination`.
pub fn copy_file<P1, P2>(source: P1, destination: P2) -> Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let source = source.as_ref();
    if !source.exists() {
        return Err(ComposeError::FileNotFound {
            path: source.display().to_string(),
        });
    }
    fs::copy(source, destination.as_ref()).map_err(|e| ComposeError::FileWriteFailed {
        path: destination.as_ref().display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Set owner/group/other execute bits (mode 755) on `path`.
#[cfg(unix)]
pub fn set_executable<P: AsRef<Path>>(path: P) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    if !path.exists() {
        return Err(ComposeError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| {
        ComposeError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })
}

/// Execute bits do not exist on non-unix targets; only the existence check
/// is meaningful there.
#[cfg(not(unix))]
pub fn set_executable<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ComposeError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
