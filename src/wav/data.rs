use bytes::Bytes;
use ndarray::Array2;

use crate::{
    error::{RiffError, RiffResult},
    riff::chunks::DATA_CHUNK,
    traits::{ChunkCodec, RiffChunk},
    wav::{WaveChunk, error::WavError, sample_domain::RawSample},
};

/// `data` chunk: raw interleaved sample bytes. How they are laid out is defined by the
/// sibling `fmt ` chunk, not by this chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataChunk {
    bytes: Bytes,
}

impl AsRef<[u8]> for DataChunk {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DataChunk {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        DataChunk {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the payload (no copy)
    pub fn to_blob(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn into_blob(self) -> Bytes {
        self.bytes
    }
}

/// Codec for the `data` chunk: the payload is passed through untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCodec;

impl ChunkCodec<WaveChunk> for DataCodec {
    fn decode(&self, payload: &[u8]) -> RiffResult<WaveChunk> {
        Ok(WaveChunk::Data(DataChunk::new(Bytes::copy_from_slice(
            payload,
        ))))
    }

    fn encode(&self, chunk: &WaveChunk) -> RiffResult<Vec<u8>> {
        match chunk {
            WaveChunk::Data(data) => Ok(data.as_bytes().to_vec()),
            other => Err(RiffError::CodecMismatch {
                codec: DATA_CHUNK,
                found: other.id(),
            }),
        }
    }
}

/// Split interleaved sample bytes into a `channels x frames` array.
///
/// Element `i * channels + c` of the stream becomes `[c, i]`.
pub(crate) fn deinterleave<S: RawSample>(bytes: &[u8], channels: usize) -> RiffResult<Array2<S>> {
    let width = S::KIND.bytes();
    if channels == 0 {
        return Err(WavError::channel_layout("format declares zero channels").into());
    }
    if !bytes.len().is_multiple_of(width) {
        return Err(RiffError::corrupted_data_simple(
            "Data size not aligned to sample boundaries",
            format!(
                "Data size {} is not a multiple of sample size {} for {}",
                bytes.len(),
                width,
                S::KIND
            ),
        ));
    }

    let total = bytes.len() / width;
    if !total.is_multiple_of(channels) {
        return Err(WavError::channel_layout(format!(
            "Sample count {} not divisible by channel count {}",
            total, channels
        ))
        .into());
    }
    let frames = total / channels;

    let mut planar: Vec<S> = Vec::with_capacity(total);
    for c in 0..channels {
        planar.extend(
            (0..frames).map(|i| S::read_le(&bytes[(i * channels + c) * width..])),
        );
    }

    Array2::from_shape_vec((channels, frames), planar)
        .map_err(|e| RiffError::corrupted_data_simple("Array shape error", e.to_string()))
}

/// Inverse of [`deinterleave`]: frame-major little-endian bytes
pub(crate) fn interleave<S: RawSample>(channels: &Array2<S>) -> Vec<u8> {
    let (num_channels, frames) = channels.dim();
    let mut out = Vec::with_capacity(num_channels * frames * S::KIND.bytes());
    for i in 0..frames {
        for c in 0..num_channels {
            channels[[c, i]].write_le(&mut out);
        }
    }
    out
}
