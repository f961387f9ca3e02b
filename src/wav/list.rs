use crate::{
    error::{RiffError, RiffResult},
    riff::{
        chunks::{ChunkID, INFO_LIST_TYPE, LIST_CHUNK},
        cursor::ByteCursor,
    },
    traits::{ChunkCodec, RiffChunk},
    wav::WaveChunk,
};

/// `LIST` chunk: a subtype tag (usually `INFO`) and an ordered set of entries.
///
/// Values are kept as the stored bytes (without the NUL terminator), so text in a legacy
/// encoding or binary `adtl` payloads survive a decode/encode cycle unchanged. Use
/// [`get_str`](Self::get_str) for a UTF-8 view.
///
/// Entry keys are unique; [`insert`](Self::insert) replaces an existing value in place so
/// source order survives a decode/edit/encode cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChunk {
    pub list_type: ChunkID,
    entries: Vec<(ChunkID, Vec<u8>)>,
}

impl ListChunk {
    pub const fn new(list_type: ChunkID) -> Self {
        ListChunk {
            list_type,
            entries: Vec::new(),
        }
    }

    pub const fn info() -> Self {
        Self::new(INFO_LIST_TYPE)
    }

    pub fn is_info(&self) -> bool {
        self.list_type == INFO_LIST_TYPE
    }

    /// Raw value bytes of `key`
    pub fn get(&self, key: ChunkID) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Value of `key` as text; `None` if absent or not valid UTF-8
    pub fn get_str(&self, key: ChunkID) -> Option<&str> {
        self.get(key).and_then(|v| core::str::from_utf8(v).ok())
    }

    /// Set `key`, returning the previous value if there was one
    pub fn insert(&mut self, key: ChunkID, value: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: ChunkID) -> Option<Vec<u8>> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkID, &[u8])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = ChunkID> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a `LIST` payload: subtype, then `key + size + value + NUL [+ pad]` records.
    pub fn from_bytes(bytes: &[u8]) -> RiffResult<Self> {
        let mut cursor = ByteCursor::new(bytes);
        let mut list = ListChunk::new(cursor.read_tag("LIST type")?);

        while !cursor.is_empty() {
            let key = cursor.read_tag("LIST entry key")?;
            let size = cursor.read_u32_le("LIST entry size")? as usize;
            // size counts the trailing NUL
            let value = cursor.take(size.saturating_sub(1), "LIST entry value")?;

            tracing::trace!(%key, size, value = %String::from_utf8_lossy(value), "read LIST entry");
            list.insert(key, value);

            let terminator_and_pad = (size + (size & 1)).saturating_sub(value.len());
            if cursor.skip_saturating(terminator_and_pad) < terminator_and_pad {
                tracing::warn!(%key, "LIST entry ends without terminator or padding");
            }
        }

        Ok(list)
    }

    /// Serialize; entries with empty values are left out.
    pub fn to_bytes(&self) -> RiffResult<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(self.list_type.as_bytes());

        for (key, value) in self.entries.iter().filter(|(_, v)| !v.is_empty()) {
            let size = u32::try_from(value.len() + 1).map_err(|_| {
                RiffError::corrupted_data_simple(
                    format!("LIST entry '{}' too large", key),
                    format!("{} bytes", value.len()),
                )
            })?;
            out.extend_from_slice(key.as_bytes());
            out.extend_from_slice(&size.to_le_bytes());
            out.extend_from_slice(value);
            out.push(0);
            if size % 2 == 1 {
                out.push(0);
            }
        }

        Ok(out)
    }
}

/// Codec for `LIST` chunks
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec;

impl ChunkCodec<WaveChunk> for ListCodec {
    fn decode(&self, payload: &[u8]) -> RiffResult<WaveChunk> {
        ListChunk::from_bytes(payload).map(WaveChunk::List)
    }

    fn encode(&self, chunk: &WaveChunk) -> RiffResult<Vec<u8>> {
        match chunk {
            WaveChunk::List(list) => list.to_bytes(),
            other => Err(RiffError::CodecMismatch {
                codec: LIST_CHUNK,
                found: other.id(),
            }),
        }
    }
}
