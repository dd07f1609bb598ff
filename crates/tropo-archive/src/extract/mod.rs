//! Extraction pipeline shared by every archive format.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::entry::{ArchiveReport, Entry, EntryStatus};
use crate::error::{Error, Result};
use crate::format::{self, ArchiveFormat};
use crate::sanitize::resolve_entry_path;

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "tar")]
pub use tar::TarSource;
#[cfg(feature = "zip")]
pub use zip::ZipSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingKind {
    File,
    Directory,
    /// Links, devices and other records with no file content.
    Other,
}

/// An entry handed out by an [`EntrySource`], data not yet consumed.
pub struct PendingEntry<'a> {
    pub original_path: PathBuf,
    pub size: u64,
    pub mode: Option<u32>,
    pub kind: PendingKind,
    pub reader: &'a mut dyn Read,
}

/// Archive-specific entry enumeration.
pub trait EntrySource {
    fn format(&self) -> ArchiveFormat;

    /// Feed every entry to `visit`, in archive order, stopping at the first error.
    fn for_each_entry(
        &mut self,
        visit: &mut dyn FnMut(PendingEntry<'_>) -> Result<()>,
    ) -> Result<()>;
}

/// Materialize every file entry of `source` under `destination`.
///
/// Files that already exist at their destination are skipped without
/// reading their data, but still reported.
pub fn extract<S: EntrySource>(source: &mut S, destination: &Path) -> Result<ArchiveReport> {
    let mut entries = Vec::new();

    source.for_each_entry(&mut |pending| {
        match pending.kind {
            PendingKind::File => {}
            PendingKind::Directory => return Ok(()),
            PendingKind::Other => {
                debug!(entry = %pending.original_path.display(), "ignoring non-file entry");
                return Ok(());
            }
        }

        let target_path = resolve_entry_path(&pending.original_path, destination)?;
        let status = if target_path.exists() {
            debug!(path = %target_path.display(), "already extracted, skipping");
            EntryStatus::Skipped
        } else {
            write_file(pending.reader, &pending.original_path, &target_path)?;
            apply_mode(&target_path, pending.mode)?;
            EntryStatus::Written
        };

        entries.push(Entry {
            original_path: pending.original_path,
            target_path,
            size: pending.size,
            status,
        });
        Ok(())
    })?;

    Ok(ArchiveReport {
        format: source.format(),
        entries,
    })
}

fn write_file(reader: &mut dyn Read, entry: &Path, target_path: &Path) -> Result<()> {
    tropo_fs::ensure_parent(target_path).map_err(|e| Error::DirectoryCreationFailed {
        path: e.path().to_path_buf(),
        source: e,
    })?;

    let file = File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;

    let copied = copy_entry(reader, file, entry, target_path);
    if copied.is_err() {
        // a partial file would be mistaken for a finished one on the next run
        let _ = std::fs::remove_file(target_path);
    }
    copied
}

fn copy_entry(reader: &mut dyn Read, mut file: File, entry: &Path, target_path: &Path) -> Result<()> {
    let mut buf = [0u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::EntryRead {
                    entry: entry.to_path_buf(),
                    source: e,
                });
            }
        };
        file.write_all(&buf[..n]).map_err(|e| Error::ExtractionFailed {
            path: target_path.to_path_buf(),
            source: e,
        })?;
    }
    file.flush().map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode {
        Some(mode) if mode & 0o111 != 0 => {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
                Error::ExtractionFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

/// Extract an archive with automatic format detection.
pub fn extract_from_reader<R: Read + Seek>(mut reader: R, destination: &Path) -> Result<ArchiveReport> {
    let detected = format::detect_from_reader(&mut reader).map_err(|e| Error::Corrupted {
        reason: e.to_string(),
    })?;

    match detected.ok_or(Error::UnsupportedFormat)? {
        #[cfg(feature = "zip")]
        ArchiveFormat::Zip => extract(&mut ZipSource::new(reader)?, destination),
        #[cfg(feature = "tar")]
        ArchiveFormat::Tar(codec) => extract(&mut TarSource::new(reader, codec), destination),
        #[allow(unreachable_patterns)]
        _ => Err(Error::UnsupportedFormat),
    }
}

/// Extract the archive at `archive` into `destination`.
///
/// The archive handle lives for the duration of this call only.
pub fn extract_file(archive: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<ArchiveReport> {
    let archive = archive.as_ref();
    let destination = destination.as_ref();
    info!(archive = %archive.display(), into = %destination.display(), "extracting");

    let file = File::open(archive).map_err(|e| Error::Open {
        path: archive.to_path_buf(),
        source: e,
    })?;
    let report = extract_from_reader(BufReader::new(file), destination)?;

    info!(
        archive = %archive.display(),
        written = report.written(),
        skipped = report.skipped(),
        "extracted"
    );
    Ok(report)
}
