//! Generic RIFF container codec.
//!
//! Knows nothing about audio: a container is `"RIFF" + size + type` followed by
//! `id + size + payload` records. Payloads are interpreted by whatever codec is
//! registered for their id in a [`ChunkRegistry`]; anything else is kept verbatim as an
//! [`UnknownChunk`].

pub mod chunks;
pub mod container;
pub(crate) mod cursor;
pub mod registry;

pub use chunks::ChunkID;
pub use container::{
    CHUNK_HEADER_LEN, RIFF_HEADER_LEN, RiffFile, UnknownChunk, decode_riff, encode_riff,
};
pub use registry::ChunkRegistry;
