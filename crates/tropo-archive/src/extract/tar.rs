use std::io::Read;

use crate::error::{Error, Result};
use crate::extract::{EntrySource, PendingEntry, PendingKind};
use crate::format::{ArchiveFormat, Compression, Decoder};

pub struct TarSource<R: Read> {
    archive: tar::Archive<Decoder<R>>,
    codec: Compression,
}

impl<R: Read> TarSource<R> {
    pub fn new(reader: R, codec: Compression) -> Self {
        Self {
            archive: tar::Archive::new(codec.decoder(reader)),
            codec,
        }
    }
}

impl<R: Read> EntrySource for TarSource<R> {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Tar(self.codec)
    }

    fn for_each_entry(
        &mut self,
        visit: &mut dyn FnMut(PendingEntry<'_>) -> Result<()>,
    ) -> Result<()> {
        let corrupted = |e: std::io::Error| Error::Corrupted {
            reason: e.to_string(),
        };

        for entry in self.archive.entries().map_err(corrupted)? {
            let mut entry = entry.map_err(corrupted)?;

            let original_path = entry
                .path()
                .map_err(|_| Error::InvalidPath {
                    entry: String::from_utf8_lossy(&entry.path_bytes()).into_owned(),
                })?
                .into_owned();

            let header = entry.header();
            let entry_type = header.entry_type();
            let kind = if entry_type.is_dir() {
                PendingKind::Directory
            } else if entry_type.is_file() {
                PendingKind::File
            } else {
                PendingKind::Other
            };
            let mode = header.mode().ok();
            let size = entry.size();

            visit(PendingEntry {
                original_path,
                size,
                mode,
                kind,
                reader: &mut entry,
            })?;
        }
        Ok(())
    }
}
