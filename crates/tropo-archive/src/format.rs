use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::{Error, Result};

/// Container formats understood by the extractor. Jars and eggs are zips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(Compression),
}

/// Compression codec wrapped around a tar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

/// Bytes needed to recognize every supported format.
const SNIFF_LEN: usize = 512;

pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] => Some(ArchiveFormat::Zip),
        // empty zip: end-of-central-directory record only
        [0x50, 0x4B, 0x05, 0x06, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Tar(Compression::Gzip)),
        _ if is_tar_header(data) => Some(ArchiveFormat::Tar(Compression::None)),
        _ => None,
    }
}

// POSIX ("ustar\0") and GNU ("ustar  \0") magic share the first five bytes.
fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= SNIFF_LEN && data[257..262] == *b"ustar"
}

/// Sniff the format from the start of `reader`, leaving it rewound.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let mut header = Vec::with_capacity(SNIFF_LEN);
    reader.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    reader.rewind()?;
    Ok(detect_format(&header))
}

/// Sniff the format of the archive at `path`.
pub fn detect_file(path: impl AsRef<Path>) -> Result<Option<ArchiveFormat>> {
    let path = path.as_ref();
    let open_err = |source| Error::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(open_err)?;
    detect_from_reader(&mut file).map_err(open_err)
}

#[cfg(feature = "tar")]
pub(crate) enum Decoder<R: Read> {
    Passthrough(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
}

#[cfg(feature = "tar")]
impl Compression {
    pub(crate) fn decoder<R: Read>(self, reader: R) -> Decoder<R> {
        match self {
            Self::None => Decoder::Passthrough(reader),
            Self::Gzip => Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(reader))),
        }
    }
}

#[cfg(feature = "tar")]
impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
        }
    }
}
