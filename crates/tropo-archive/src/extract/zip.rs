use std::io::{Read, Seek};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::extract::{EntrySource, PendingEntry, PendingKind};
use crate::format::ArchiveFormat;

pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(|e| Error::Corrupted {
            reason: e.to_string(),
        })?;
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Zip
    }

    fn for_each_entry(
        &mut self,
        visit: &mut dyn FnMut(PendingEntry<'_>) -> Result<()>,
    ) -> Result<()> {
        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index).map_err(|e| Error::Corrupted {
                reason: e.to_string(),
            })?;

            // names are always '/'-separated; PathBuf accepts that on every platform
            let original_path = PathBuf::from(file.name());
            let kind = if file.is_dir() {
                PendingKind::Directory
            } else {
                PendingKind::File
            };
            let size = file.size();
            let mode = file.unix_mode();

            visit(PendingEntry {
                original_path,
                size,
                mode,
                kind,
                reader: &mut file,
            })?;
        }
        Ok(())
    }
}
