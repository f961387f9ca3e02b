use core::fmt::{Debug, Display, Formatter, Result as FmtResult};
use core::str::FromStr;

use crate::error::{RiffError, RiffResult};

/// FourCC tag used for container types, chunk ids and LIST entry keys.
///
/// Always exactly four ASCII bytes; the constructors reject anything else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkID {
    id: [u8; 4],
}

impl AsRef<[u8]> for ChunkID {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.id
    }
}

impl Display for ChunkID {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // ASCII is guaranteed by construction
        for b in self.id {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl Debug for ChunkID {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ChunkID({:?})", self.as_str())
    }
}

impl TryFrom<&[u8]> for ChunkID {
    type Error = RiffError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let id: [u8; 4] = value
            .try_into()
            .map_err(|_| RiffError::invalid_tag(String::from_utf8_lossy(value)))?;
        ChunkID::from_bytes(id)
    }
}

impl TryFrom<&str> for ChunkID {
    type Error = RiffError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ChunkID::try_from(value.as_bytes())
    }
}

impl FromStr for ChunkID {
    type Err = RiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChunkID::try_from(s)
    }
}

impl PartialEq<&str> for ChunkID {
    fn eq(&self, other: &&str) -> bool {
        self.id == other.as_bytes()
    }
}

impl ChunkID {
    /// Build a tag from a literal. Intended for constants; non-ASCII input is a
    /// compile-time error when used in a `const` context.
    ///
    /// # Panics
    ///
    /// Panics at runtime if `id` is not ASCII. Use [`ChunkID::from_bytes`] or
    /// `TryFrom` for bytes that come from input.
    #[inline]
    pub const fn new(id: &[u8; 4]) -> Self {
        assert!(id.is_ascii(), "chunk ids must be ASCII");
        ChunkID { id: *id }
    }

    /// Checked constructor for bytes read from a buffer
    pub fn from_bytes(id: [u8; 4]) -> RiffResult<Self> {
        if id.is_ascii() {
            Ok(ChunkID { id })
        } else {
            Err(RiffError::invalid_tag(format!(
                "0x{:02X}{:02X}{:02X}{:02X}",
                id[0], id[1], id[2], id[3]
            )))
        }
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.id
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // ASCII is valid UTF-8
        core::str::from_utf8(&self.id).unwrap_or_default()
    }
}

pub const RIFF_MAGIC: ChunkID = ChunkID::new(b"RIFF");
pub const WAVE_TYPE: ChunkID = ChunkID::new(b"WAVE");
pub const FMT_CHUNK: ChunkID = ChunkID::new(b"fmt ");
pub const DATA_CHUNK: ChunkID = ChunkID::new(b"data");
pub const LIST_CHUNK: ChunkID = ChunkID::new(b"LIST");
pub const INFO_LIST_TYPE: ChunkID = ChunkID::new(b"INFO");
