use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Map an archive entry name onto `base`.
///
/// Entry names are relative; `.` segments are dropped and `..` may only
/// cancel a segment that precedes it. Anything that would land outside
/// `base` is rejected.
pub fn resolve_entry_path(entry: &Path, base: &Path) -> Result<PathBuf> {
    if entry.as_os_str().to_string_lossy().contains('\0') {
        return Err(Error::InvalidPath {
            entry: entry.to_string_lossy().into_owned(),
        });
    }

    let mut relative = PathBuf::new();
    for component in entry.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(Error::ZipSlip {
                        entry: entry.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::ZipSlip {
                    entry: entry.to_path_buf(),
                });
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(Error::InvalidPath {
            entry: entry.to_string_lossy().into_owned(),
        });
    }

    Ok(base.join(relative))
}
