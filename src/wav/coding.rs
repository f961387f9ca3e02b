use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

use bytes::Bytes;
use half::f16;
use ndarray::{Array2, ArrayView1, Axis};

use crate::{
    error::{RiffError, RiffResult},
    wav::{
        data::{deinterleave, interleave},
        error::WavError,
        sample_domain::{RawSample, SampleDomain, SampleKind},
    },
};

/// How the `data` chunk is exposed to (and accepted from) the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodingMode {
    /// Immutable shared byte blob
    RawBlob,
    /// Owned, mutable byte buffer
    RawBuffer,
    /// One native-typed array per channel, raw storage values
    ChannelsFmt,
    /// One `f32` array per channel, normalized to `[-1, 1]`
    #[default]
    ChannelsFloat32,
}

impl CodingMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            CodingMode::RawBlob => "raw-blob",
            CodingMode::RawBuffer => "raw-buffer",
            CodingMode::ChannelsFmt => "channels-fmt",
            CodingMode::ChannelsFloat32 => "channels-float32",
        }
    }

    /// Whether this mode interprets sample values (and so needs a supported format)
    pub const fn is_sample_domain(self) -> bool {
        matches!(self, CodingMode::ChannelsFmt | CodingMode::ChannelsFloat32)
    }
}

impl Display for CodingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CodingMode {
    type Err = WavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw-blob" => Ok(CodingMode::RawBlob),
            "raw-buffer" => Ok(CodingMode::RawBuffer),
            "channels-fmt" => Ok(CodingMode::ChannelsFmt),
            "channels-float32" => Ok(CodingMode::ChannelsFloat32),
            other => Err(WavError::UnknownCodingMode(other.to_string())),
        }
    }
}

/// Channel buffers in their on-disk element type, shaped `channels x frames`
#[derive(Debug, Clone, PartialEq)]
pub enum NativeChannels {
    U8(Array2<u8>),
    I16(Array2<i16>),
    I32(Array2<i32>),
    F16(Array2<f16>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

/// Dispatch on the concrete array type inside a `NativeChannels`
macro_rules! with_native {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            NativeChannels::U8($arr) => $body,
            NativeChannels::I16($arr) => $body,
            NativeChannels::I32($arr) => $body,
            NativeChannels::F16($arr) => $body,
            NativeChannels::F32($arr) => $body,
            NativeChannels::F64($arr) => $body,
        }
    };
}

impl NativeChannels {
    pub const fn kind(&self) -> SampleKind {
        match self {
            NativeChannels::U8(_) => SampleKind::U8,
            NativeChannels::I16(_) => SampleKind::I16,
            NativeChannels::I32(_) => SampleKind::I32,
            NativeChannels::F16(_) => SampleKind::F16,
            NativeChannels::F32(_) => SampleKind::F32,
            NativeChannels::F64(_) => SampleKind::F64,
        }
    }

    pub fn num_channels(&self) -> usize {
        with_native!(self, arr => arr.nrows())
    }

    pub fn frames(&self) -> usize {
        with_native!(self, arr => arr.ncols())
    }

    /// Reinterpret interleaved `data` bytes as native channel arrays
    pub(crate) fn from_interleaved(
        bytes: &[u8],
        kind: SampleKind,
        channels: usize,
    ) -> RiffResult<Self> {
        Ok(match kind {
            SampleKind::U8 => NativeChannels::U8(deinterleave(bytes, channels)?),
            SampleKind::I16 => NativeChannels::I16(deinterleave(bytes, channels)?),
            SampleKind::I32 => NativeChannels::I32(deinterleave(bytes, channels)?),
            SampleKind::F16 => NativeChannels::F16(deinterleave(bytes, channels)?),
            SampleKind::F32 => NativeChannels::F32(deinterleave(bytes, channels)?),
            SampleKind::F64 => NativeChannels::F64(deinterleave(bytes, channels)?),
        })
    }

    pub(crate) fn to_interleaved(&self) -> Vec<u8> {
        with_native!(self, arr => interleave(arr))
    }

    /// Map raw values into `[-1, 1]` using the domain's range
    pub fn to_normalized(&self, domain: &SampleDomain) -> Array2<f32> {
        with_native!(self, arr => arr.mapv(|raw| domain.normalize(raw.to_f64()) as f32))
    }

    /// Quantize normalized values into the storage type of `domain`
    pub fn from_normalized(normalized: &Array2<f32>, domain: &SampleDomain) -> Self {
        fn quantize<S: RawSample>(normalized: &Array2<f32>, domain: &SampleDomain) -> Array2<S> {
            normalized.mapv(|n| S::from_f64(domain.denormalize(n as f64)))
        }

        match domain.kind {
            SampleKind::U8 => NativeChannels::U8(quantize(normalized, domain)),
            SampleKind::I16 => NativeChannels::I16(quantize(normalized, domain)),
            SampleKind::I32 => NativeChannels::I32(quantize(normalized, domain)),
            SampleKind::F16 => NativeChannels::F16(quantize(normalized, domain)),
            SampleKind::F32 => NativeChannels::F32(quantize(normalized, domain)),
            SampleKind::F64 => NativeChannels::F64(quantize(normalized, domain)),
        }
    }
}

impl From<Array2<u8>> for NativeChannels {
    fn from(value: Array2<u8>) -> Self {
        NativeChannels::U8(value)
    }
}

impl From<Array2<i16>> for NativeChannels {
    fn from(value: Array2<i16>) -> Self {
        NativeChannels::I16(value)
    }
}

impl From<Array2<i32>> for NativeChannels {
    fn from(value: Array2<i32>) -> Self {
        NativeChannels::I32(value)
    }
}

impl From<Array2<f16>> for NativeChannels {
    fn from(value: Array2<f16>) -> Self {
        NativeChannels::F16(value)
    }
}

impl From<Array2<f32>> for NativeChannels {
    fn from(value: Array2<f32>) -> Self {
        NativeChannels::F32(value)
    }
}

impl From<Array2<f64>> for NativeChannels {
    fn from(value: Array2<f64>) -> Self {
        NativeChannels::F64(value)
    }
}

/// The `data` chunk contents in the representation picked by a [`CodingMode`]
#[derive(Debug, Clone, PartialEq)]
pub enum AudioPayload {
    RawBlob(Bytes),
    RawBuffer(Vec<u8>),
    Channels(NativeChannels),
    /// `channels x frames`, values in `[-1, 1]`
    Float32(Array2<f32>),
}

impl AudioPayload {
    pub const fn mode(&self) -> CodingMode {
        match self {
            AudioPayload::RawBlob(_) => CodingMode::RawBlob,
            AudioPayload::RawBuffer(_) => CodingMode::RawBuffer,
            AudioPayload::Channels(_) => CodingMode::ChannelsFmt,
            AudioPayload::Float32(_) => CodingMode::ChannelsFloat32,
        }
    }

    /// Number of channel buffers, `None` for the raw modes
    pub fn num_channels(&self) -> Option<usize> {
        match self {
            AudioPayload::Channels(native) => Some(native.num_channels()),
            AudioPayload::Float32(arr) => Some(arr.nrows()),
            AudioPayload::RawBlob(_) | AudioPayload::RawBuffer(_) => None,
        }
    }

    /// Normalized view of one channel, if this payload holds float32 channels
    pub fn channel_f32(&self, channel: usize) -> Option<ArrayView1<'_, f32>> {
        match self {
            AudioPayload::Float32(arr) if channel < arr.nrows() => {
                Some(arr.index_axis(Axis(0), channel))
            }
            _ => None,
        }
    }

    /// Build the requested representation from raw `data` bytes.
    ///
    /// `domain` is only consulted by the channel modes, so an unsupported bit depth does not
    /// affect the raw modes.
    pub(crate) fn decode(
        bytes: Bytes,
        mode: CodingMode,
        domain: impl FnOnce() -> Result<&'static SampleDomain, WavError>,
        channels: usize,
    ) -> RiffResult<Self> {
        Ok(match mode {
            CodingMode::RawBlob => AudioPayload::RawBlob(bytes),
            CodingMode::RawBuffer => AudioPayload::RawBuffer(bytes.to_vec()),
            CodingMode::ChannelsFmt => AudioPayload::Channels(NativeChannels::from_interleaved(
                &bytes,
                domain()?.kind,
                channels,
            )?),
            CodingMode::ChannelsFloat32 => {
                let domain = domain()?;
                let native = NativeChannels::from_interleaved(&bytes, domain.kind, channels)?;
                AudioPayload::Float32(native.to_normalized(domain))
            }
        })
    }

    /// Produce the raw `data` bytes for this payload.
    pub(crate) fn encode(
        &self,
        domain: impl FnOnce() -> Result<&'static SampleDomain, WavError>,
        channels: usize,
    ) -> RiffResult<Bytes> {
        if let Some(found) = self.num_channels() {
            if found != channels {
                return Err(WavError::channel_layout(format!(
                    "{} channel buffers supplied for a {}-channel format",
                    found, channels
                ))
                .into());
            }
        }

        Ok(match self {
            AudioPayload::RawBlob(blob) => blob.clone(),
            AudioPayload::RawBuffer(buf) => Bytes::copy_from_slice(buf),
            AudioPayload::Channels(native) => {
                let expected = domain()?.kind;
                if native.kind() != expected {
                    return Err(RiffError::from(WavError::SampleTypeMismatch {
                        expected,
                        found: native.kind(),
                    }));
                }
                Bytes::from(native.to_interleaved())
            }
            AudioPayload::Float32(arr) => {
                let native = NativeChannels::from_normalized(arr, domain()?);
                Bytes::from(native.to_interleaved())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::AudioFormat;
    use ndarray::array;

    fn pcm16() -> Result<&'static SampleDomain, WavError> {
        SampleDomain::lookup(AudioFormat::Pcm, 16)
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in [
            CodingMode::RawBlob,
            CodingMode::RawBuffer,
            CodingMode::ChannelsFmt,
            CodingMode::ChannelsFloat32,
        ] {
            assert_eq!(mode.as_str().parse::<CodingMode>().unwrap(), mode);
        }
        let err = "channels-int8".parse::<CodingMode>().unwrap_err();
        assert!(matches!(&err, WavError::UnknownCodingMode(name) if name == "channels-int8"));
        assert!(err.to_string().contains("channels-float32"));
    }

    #[test]
    fn test_float32_decode_uses_affine_map() {
        let samples: [i16; 4] = [i16::MIN, i16::MAX, 0, -1];
        let bytes = Bytes::copy_from_slice(bytemuck::cast_slice(&samples));
        let payload = AudioPayload::decode(bytes, CodingMode::ChannelsFloat32, pcm16, 2).unwrap();

        let expected = |raw: f64| (((raw + 32768.0) / 65535.0) * 2.0 - 1.0) as f32;
        assert_eq!(
            payload,
            AudioPayload::Float32(array![
                [-1.0, expected(0.0)],
                [1.0, expected(-1.0)]
            ])
        );
    }

    #[test]
    fn test_raw_modes_ignore_unsupported_domain() {
        let unsupported = || SampleDomain::lookup(AudioFormat::Pcm, 24);
        let bytes = Bytes::from_static(&[1, 2, 3]);

        let blob = AudioPayload::decode(bytes.clone(), CodingMode::RawBlob, unsupported, 1).unwrap();
        assert_eq!(blob, AudioPayload::RawBlob(bytes.clone()));
        assert_eq!(blob.encode(unsupported, 1).unwrap(), bytes);

        let err = AudioPayload::decode(bytes, CodingMode::ChannelsFmt, unsupported, 1).unwrap_err();
        assert!(matches!(
            err,
            RiffError::WavError(WavError::UnsupportedBitsPerChannel { bits: 24, .. })
        ));
    }

    #[test]
    fn test_encode_rejects_wrong_native_kind() {
        let payload = AudioPayload::Channels(NativeChannels::F32(array![[0.0f32, 0.5]]));
        let err = payload.encode(pcm16, 1).unwrap_err();
        assert!(matches!(
            err,
            RiffError::WavError(WavError::SampleTypeMismatch {
                expected: SampleKind::I16,
                found: SampleKind::F32
            })
        ));
    }

    #[test]
    fn test_encode_rejects_channel_count_mismatch() {
        let payload = AudioPayload::Float32(array![[0.0f32], [0.0]]);
        let err = payload.encode(pcm16, 1).unwrap_err();
        assert!(matches!(err, RiffError::WavError(WavError::ChannelLayout(_))));
    }

    #[test]
    fn test_quantization_saturates_out_of_range() {
        let domain = pcm16().unwrap();
        let native = NativeChannels::from_normalized(&array![[2.0f32, -3.0, 1.0, -1.0]], domain);
        assert_eq!(
            native,
            NativeChannels::I16(array![[i16::MAX, i16::MIN, i16::MAX, i16::MIN]])
        );
    }

    #[test]
    fn test_channel_view() {
        let payload = AudioPayload::Float32(array![[0.1f32, 0.2], [0.3, 0.4]]);
        assert_eq!(payload.channel_f32(1).unwrap().to_vec(), vec![0.3, 0.4]);
        assert!(payload.channel_f32(2).is_none());
        assert_eq!(payload.mode(), CodingMode::ChannelsFloat32);
    }
}
