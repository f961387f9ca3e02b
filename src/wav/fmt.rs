use core::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    error::{RiffError, RiffResult},
    riff::{chunks::FMT_CHUNK, cursor::ByteCursor},
    traits::{ChunkCodec, RiffChunk},
    wav::{
        AudioFormat, WaveChunk,
        error::WavError,
        sample_domain::{SampleDomain, SampleKind},
    },
};

/// Size of the base `fmt ` payload
pub const FMT_CHUNK_SIZE: usize = 16;

/// Decoded `fmt ` chunk.
///
/// `byte_rate` and `block_align` are carried as stored; they are not checked against the
/// other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChunk {
    pub audio_format: AudioFormat,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_channel: u16,
}

impl FormatChunk {
    /// Build a format description, deriving `block_align` and `byte_rate`
    pub const fn new(
        audio_format: AudioFormat,
        channels: u16,
        sample_rate: u32,
        bits_per_channel: u16,
    ) -> Self {
        let block_align = channels.wrapping_mul(bits_per_channel / 8);
        FormatChunk {
            audio_format,
            channels,
            sample_rate,
            byte_rate: sample_rate.wrapping_mul(block_align as u32),
            block_align,
            bits_per_channel,
        }
    }

    /// Parse the 16-byte layout. Longer payloads (e.g. `cbSize` extensions) are accepted and
    /// the trailing bytes ignored.
    pub fn from_bytes(bytes: &[u8]) -> RiffResult<Self> {
        if bytes.len() < FMT_CHUNK_SIZE {
            return Err(WavError::InvalidFmtChunkSize(bytes.len()).into());
        }
        if bytes.len() > FMT_CHUNK_SIZE {
            tracing::warn!(
                size = bytes.len(),
                "fmt chunk longer than 16 bytes, ignoring extension"
            );
        }

        let mut cursor = ByteCursor::new(bytes);
        let audio_format = AudioFormat::try_from(cursor.read_u16_le("audio format")?)?;
        Ok(FormatChunk {
            audio_format,
            channels: cursor.read_u16_le("channels")?,
            sample_rate: cursor.read_u32_le("sample rate")?,
            byte_rate: cursor.read_u32_le("byte rate")?,
            block_align: cursor.read_u16_le("block align")?,
            bits_per_channel: cursor.read_u16_le("bits per channel")?,
        })
    }

    pub fn to_bytes(&self) -> [u8; FMT_CHUNK_SIZE] {
        let mut bytes = [0u8; FMT_CHUNK_SIZE];
        bytes[0..2].copy_from_slice(&self.audio_format.as_u16().to_le_bytes());
        bytes[2..4].copy_from_slice(&self.channels.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.byte_rate.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.bits_per_channel.to_le_bytes());
        bytes
    }

    /// Storage descriptor for this format's samples
    pub fn sample_domain(&self) -> Result<&'static SampleDomain, WavError> {
        SampleDomain::lookup(self.audio_format, self.bits_per_channel)
    }

    pub fn sample_kind(&self) -> Result<SampleKind, WavError> {
        Ok(self.sample_domain()?.kind)
    }
}

impl Display for FormatChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "FormatChunk {{ format: {}, channels: {}, sample_rate: {}, byte_rate: {}, block_align: {}, bits_per_channel: {} }}",
            self.audio_format,
            self.channels,
            self.sample_rate,
            self.byte_rate,
            self.block_align,
            self.bits_per_channel
        )
    }
}

/// Codec for the `fmt ` chunk
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatCodec;

impl ChunkCodec<WaveChunk> for FormatCodec {
    fn decode(&self, payload: &[u8]) -> RiffResult<WaveChunk> {
        FormatChunk::from_bytes(payload).map(WaveChunk::Format)
    }

    fn encode(&self, chunk: &WaveChunk) -> RiffResult<Vec<u8>> {
        match chunk {
            WaveChunk::Format(fmt) => Ok(fmt.to_bytes().to_vec()),
            other => Err(RiffError::CodecMismatch {
                codec: FMT_CHUNK,
                found: other.id(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_base_fmt_bytes(
        format_code: u16,
        channels: u16,
        sample_rate: u32,
        byte_rate: u32,
        block_align: u16,
        bits_per_channel: u16,
    ) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..2].copy_from_slice(&format_code.to_le_bytes());
        bytes[2..4].copy_from_slice(&channels.to_le_bytes());
        bytes[4..8].copy_from_slice(&sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&byte_rate.to_le_bytes());
        bytes[12..14].copy_from_slice(&block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&bits_per_channel.to_le_bytes());
        bytes
    }

    #[test]
    fn test_fmt_decodes_pcm_and_float() {
        let bytes = make_base_fmt_bytes(1, 2, 44_100, 176_400, 4, 16);
        let fmt = FormatChunk::from_bytes(&bytes).unwrap();
        assert_eq!(fmt, FormatChunk::new(AudioFormat::Pcm, 2, 44_100, 16));

        let bytes = make_base_fmt_bytes(3, 1, 48_000, 192_000, 4, 32);
        let fmt = FormatChunk::from_bytes(&bytes).unwrap();
        assert_eq!(fmt.audio_format, AudioFormat::Float);
        assert_eq!(fmt.bits_per_channel, 32);
    }

    #[test]
    fn test_fmt_rejects_other_format_codes() {
        for code in [0u16, 2, 0x11, 0xFFFE] {
            let bytes = make_base_fmt_bytes(code, 2, 44_100, 176_400, 4, 16);
            let err = FormatChunk::from_bytes(&bytes).unwrap_err();
            assert!(
                matches!(err, RiffError::WavError(WavError::UnsupportedAudioFormat(c)) if c == code)
            );
        }
    }

    #[test]
    fn test_fmt_keeps_inconsistent_rates() {
        // byte_rate/block_align are informational only
        let bytes = make_base_fmt_bytes(1, 2, 48_000, 1_000, 3, 16);
        let fmt = FormatChunk::from_bytes(&bytes).unwrap();
        assert_eq!(fmt.byte_rate, 1_000);
        assert_eq!(fmt.block_align, 3);
        assert_eq!(fmt.to_bytes(), bytes);
    }

    #[test]
    fn test_fmt_rejects_short_payload() {
        let err = FormatChunk::from_bytes(&[1, 0, 2, 0]).unwrap_err();
        assert!(matches!(
            err,
            RiffError::WavError(WavError::InvalidFmtChunkSize(4))
        ));
    }

    #[test]
    fn test_fmt_accepts_extended_payload() {
        let mut bytes = make_base_fmt_bytes(1, 1, 8_000, 8_000, 1, 8).to_vec();
        bytes.extend_from_slice(&[0, 0]);
        let fmt = FormatChunk::from_bytes(&bytes).unwrap();
        assert_eq!(fmt.sample_rate, 8_000);
    }

    #[test]
    fn test_codec_rejects_other_chunk_kinds() {
        let chunk = WaveChunk::Data(crate::wav::DataChunk::new(vec![1, 2]));
        let err = FormatCodec.encode(&chunk).unwrap_err();
        assert!(matches!(err, RiffError::CodecMismatch { .. }));
    }
}
