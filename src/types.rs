use core::fmt::{Debug, Formatter, Result as FmtResult};
use std::borrow::Borrow;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

/// Unified view over the bytes a container is decoded from
#[non_exhaustive]
pub enum ByteSource<'a> {
    /// Owned heap-allocated byte buffer
    Owned(Vec<u8>),

    /// Memory-mapped file (zero-copy, OS-backed)
    MemoryMapped(Mmap),

    /// Borrowed byte slice
    Borrowed(&'a [u8]),
}

impl<'a> ByteSource<'a> {
    /// Load a file according to `options`
    pub fn open<P: AsRef<Path>>(path: P, options: OpenOptions) -> io::Result<ByteSource<'static>> {
        let file = File::open(path.as_ref())?;
        if options.use_memory_map {
            tracing::debug!(path = %path.as_ref().display(), "memory-mapping source");
            ByteSource::from_file(&file)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "reading source into memory");
            let mut bytes = Vec::new();
            BufReader::new(file).read_to_end(&mut bytes)?;
            Ok(ByteSource::Owned(bytes))
        }
    }

    /// Create a memory-mapped source from a file
    pub fn from_file(file: &File) -> io::Result<ByteSource<'static>> {
        // Safety: the map is read-only; callers must not truncate the file while it is mapped.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(ByteSource::MemoryMapped(mmap))
    }

    /// Returns the source as a contiguous byte slice
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteSource::Owned(data) => data.as_slice(),
            ByteSource::MemoryMapped(mmap) => mmap.as_ref(),
            ByteSource::Borrowed(slice) => slice,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forces this source into an owned buffer
    pub fn into_owned(self) -> Vec<u8> {
        match self {
            ByteSource::Owned(data) => data,
            ByteSource::Borrowed(slice) => slice.to_vec(),
            ByteSource::MemoryMapped(mmap) => mmap.as_ref().to_vec(),
        }
    }
}

impl Deref for ByteSource<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for ByteSource<'_> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Borrow<[u8]> for ByteSource<'_> {
    #[inline]
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for ByteSource<'_> {
    fn from(value: Vec<u8>) -> Self {
        ByteSource::Owned(value)
    }
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(value: &'a [u8]) -> Self {
        ByteSource::Borrowed(value)
    }
}

impl From<Mmap> for ByteSource<'_> {
    fn from(value: Mmap) -> Self {
        ByteSource::MemoryMapped(value)
    }
}

impl Debug for ByteSource<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            ByteSource::Owned(_) => "ByteSource::Owned",
            ByteSource::MemoryMapped(_) => "ByteSource::MemoryMapped",
            ByteSource::Borrowed(_) => "ByteSource::Borrowed",
        };
        f.debug_struct(name).field("len", &self.len()).finish()
    }
}

/// How files are loaded into a [`ByteSource`]
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    pub use_memory_map: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        OpenOptions {
            use_memory_map: true,
        }
    }
}

/// Container-level decode/encode switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffOptions {
    /// Require the first four bytes to be `RIFF` when decoding
    pub validate_header: bool,
    /// Word-align top-level chunks: write a zero pad byte after odd-length payloads and
    /// skip it when reading. Off by default, in which case records are packed back to back.
    pub pad_odd_chunks: bool,
}

impl RiffOptions {
    pub const fn new() -> Self {
        RiffOptions {
            validate_header: true,
            pad_odd_chunks: false,
        }
    }

    pub const fn validate_header(mut self, validate: bool) -> Self {
        self.validate_header = validate;
        self
    }

    pub const fn pad_odd_chunks(mut self, pad: bool) -> Self {
        self.pad_odd_chunks = pad;
        self
    }
}

impl Default for RiffOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_with_and_without_mmap() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"RIFF\x04\x00\x00\x00WAVE").unwrap();
        tmp.flush().unwrap();

        let mapped = ByteSource::open(tmp.path(), OpenOptions::default()).unwrap();
        assert!(matches!(mapped, ByteSource::MemoryMapped(_)));
        assert_eq!(&mapped[..4], b"RIFF");

        let owned = ByteSource::open(
            tmp.path(),
            OpenOptions {
                use_memory_map: false,
            },
        )
        .unwrap();
        assert!(matches!(owned, ByteSource::Owned(_)));
        assert_eq!(owned.as_bytes(), mapped.as_bytes());
    }

    #[test]
    fn test_byte_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ByteSource<'static>>();
    }

    #[test]
    fn test_riff_options_defaults() {
        let options = RiffOptions::default();
        assert!(options.validate_header);
        assert!(!options.pad_odd_chunks);
        let options = options.validate_header(false).pad_odd_chunks(true);
        assert!(!options.validate_header);
        assert!(options.pad_odd_chunks);
    }
}
