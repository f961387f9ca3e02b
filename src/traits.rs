use crate::{error::RiffResult, riff::chunks::ChunkID};

/// A typed chunk that can live in a RIFF container's content list.
pub trait RiffChunk {
    /// The four-character tag this chunk is serialized under
    fn id(&self) -> ChunkID;
}

/// Payload codec for one chunk id.
///
/// ## Why a trait object and not an enum of known ids?
///
/// The container walker only knows "tag + length + bytes". Codecs are looked up by tag in a
/// [`ChunkRegistry`](crate::riff::registry::ChunkRegistry), so a RIFF variant other than WAVE
/// can register its own chunk kinds without touching the walker.
///
/// `C` is the caller's chunk sum type (for WAVE, [`WaveChunk`](crate::wav::WaveChunk)).
pub trait ChunkCodec<C>: Send + Sync {
    /// Interpret a chunk payload (the bytes after the 8-byte chunk header)
    fn decode(&self, payload: &[u8]) -> RiffResult<C>;

    /// Serialize a chunk back to its payload bytes, without the chunk header
    fn encode(&self, chunk: &C) -> RiffResult<Vec<u8>>;
}

/// Adapter so a pair of plain functions can be registered as a codec.
pub struct FnCodec<C> {
    pub decode: fn(&[u8]) -> RiffResult<C>,
    pub encode: fn(&C) -> RiffResult<Vec<u8>>,
}

impl<C> ChunkCodec<C> for FnCodec<C> {
    fn decode(&self, payload: &[u8]) -> RiffResult<C> {
        (self.decode)(payload)
    }

    fn encode(&self, chunk: &C) -> RiffResult<Vec<u8>> {
        (self.encode)(chunk)
    }
}
