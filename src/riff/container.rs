use crate::{
    error::{ErrorPosition, RiffError, RiffResult},
    riff::{
        chunks::{ChunkID, RIFF_MAGIC},
        cursor::ByteCursor,
        registry::ChunkRegistry,
    },
    traits::RiffChunk,
    types::RiffOptions,
};

/// `"RIFF"` + container size + type tag
pub const RIFF_HEADER_LEN: usize = 12;
/// Chunk id + payload size
pub const CHUNK_HEADER_LEN: usize = 8;

/// A chunk whose id has no registered codec. Kept byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChunk {
    pub id: ChunkID,
    pub data: Vec<u8>,
}

impl UnknownChunk {
    pub fn new(id: ChunkID, data: impl Into<Vec<u8>>) -> Self {
        UnknownChunk {
            id,
            data: data.into(),
        }
    }
}

/// Decoded RIFF container: type tag, typed chunks and passthrough chunks, each in
/// source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiffFile<C> {
    pub riff_type: ChunkID,
    pub content: Vec<C>,
    pub unknowns: Vec<UnknownChunk>,
}

impl<C> RiffFile<C> {
    pub const fn new(riff_type: ChunkID) -> Self {
        RiffFile {
            riff_type,
            content: Vec::new(),
            unknowns: Vec::new(),
        }
    }
}

impl<C: RiffChunk> RiffFile<C> {
    /// First typed chunk with the given id
    pub fn find(&self, id: ChunkID) -> Option<&C> {
        self.content.iter().find(|chunk| chunk.id() == id)
    }

    /// Ids of all chunks, typed first, then unknown
    pub fn chunk_ids(&self) -> Vec<ChunkID> {
        self.content
            .iter()
            .map(RiffChunk::id)
            .chain(self.unknowns.iter().map(|u| u.id))
            .collect()
    }
}

/// Decode a RIFF container, handing each chunk payload to the codec registered for its id.
///
/// Chunk ids must be 4 ASCII bytes. An id with a byte of `0x80` or above fails with
/// [`RiffError::CorruptedData`], whether or not a codec is registered for it, so such
/// chunks never reach [`RiffFile::unknowns`].
pub fn decode_riff<C>(
    bytes: &[u8],
    registry: &ChunkRegistry<C>,
    options: RiffOptions,
) -> RiffResult<RiffFile<C>> {
    if options.validate_header {
        for (index, (&found, &expected)) in bytes
            .iter()
            .zip(RIFF_MAGIC.as_bytes().iter())
            .enumerate()
        {
            if found != expected {
                return Err(RiffError::HeaderMismatch {
                    index,
                    found,
                    expected,
                });
            }
        }
    }

    let mut header = ByteCursor::new(bytes);
    header.take(4, "RIFF magic")?;
    let size = header.read_u32_le("RIFF container size")? as usize;
    let riff_type = header.read_tag("RIFF type tag")?;

    if size < 4 {
        return Err(RiffError::corrupted_data(
            "RIFF container size too small",
            format!("size {} cannot hold the 4-byte type tag", size),
            ErrorPosition::new(4).with_description("container size field"),
        ));
    }

    let end = size.checked_add(CHUNK_HEADER_LEN).ok_or_else(|| {
        RiffError::corrupted_data_simple("Container size overflow", format!("size {}", size))
    })?;
    if end > bytes.len() {
        return Err(RiffError::truncated(
            "RIFF container",
            end,
            bytes.len(),
            ErrorPosition::new(4).with_description("container size field"),
        ));
    }
    if end < bytes.len() {
        tracing::debug!(
            declared = end,
            actual = bytes.len(),
            "ignoring bytes after RIFF container"
        );
    }

    let mut file = RiffFile::new(riff_type);
    let mut cursor = ByteCursor::at(&bytes[..end], RIFF_HEADER_LEN);

    while !cursor.is_empty() {
        let offset = cursor.position();
        let id = cursor.read_tag("chunk id")?;
        let chunk_size = cursor.read_u32_le("chunk size")? as usize;
        let payload = cursor.take(chunk_size, "chunk payload")?;

        tracing::debug!(%id, size = chunk_size, offset, "read chunk");

        match registry.get(&id) {
            Some(codec) => file.content.push(codec.decode(payload)?),
            None => file.unknowns.push(UnknownChunk::new(id, payload)),
        }

        if options.pad_odd_chunks && chunk_size % 2 == 1 && cursor.skip_saturating(1) == 0 {
            tracing::warn!(%id, offset, "odd-length final chunk has no pad byte");
        }
    }

    Ok(file)
}

/// Encode a RIFF container. Typed chunks need a registered codec; unknown chunks are
/// written verbatim after them.
pub fn encode_riff<C: RiffChunk>(
    file: &RiffFile<C>,
    registry: &ChunkRegistry<C>,
    options: RiffOptions,
) -> RiffResult<Vec<u8>> {
    let mut out = Vec::with_capacity(RIFF_HEADER_LEN);
    out.extend_from_slice(RIFF_MAGIC.as_bytes());
    // patched once the body length is known
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(file.riff_type.as_bytes());

    for chunk in &file.content {
        let id = chunk.id();
        let codec = registry.get(&id).ok_or(RiffError::MissingCodec(id))?;
        let payload = codec.encode(chunk)?;
        write_chunk(&mut out, id, &payload, options)?;
    }

    for unknown in &file.unknowns {
        write_chunk(&mut out, unknown.id, &unknown.data, options)?;
    }

    let size = u32::try_from(out.len() - CHUNK_HEADER_LEN).map_err(|_| {
        RiffError::corrupted_data_simple(
            "RIFF container too large",
            format!("{} bytes exceeds the 32-bit size field", out.len()),
        )
    })?;
    out[4..8].copy_from_slice(&size.to_le_bytes());

    tracing::debug!(riff_type = %file.riff_type, size, "encoded RIFF container");
    Ok(out)
}

fn write_chunk(
    out: &mut Vec<u8>,
    id: ChunkID,
    payload: &[u8],
    options: RiffOptions,
) -> RiffResult<()> {
    let size = u32::try_from(payload.len()).map_err(|_| {
        RiffError::corrupted_data_simple(
            format!("Chunk '{}' too large", id),
            format!("{} bytes exceeds the 32-bit size field", payload.len()),
        )
    })?;

    tracing::debug!(%id, size, offset = out.len(), "writing chunk");

    out.extend_from_slice(id.as_bytes());
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(payload);
    if options.pad_odd_chunks && payload.len() % 2 == 1 {
        out.push(0);
    }
    Ok(())
}
