use core::fmt::{Display, Formatter, Result as FmtResult};

use half::f16;

use crate::wav::{AudioFormat, error::WavError};

/// Native storage type of one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    U8,
    I16,
    I32,
    F16,
    F32,
    F64,
}

impl SampleKind {
    pub const fn bits(self) -> u16 {
        match self {
            SampleKind::U8 => 8,
            SampleKind::I16 | SampleKind::F16 => 16,
            SampleKind::I32 | SampleKind::F32 => 32,
            SampleKind::F64 => 64,
        }
    }

    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

impl Display for SampleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            SampleKind::U8 => "u8",
            SampleKind::I16 => "i16",
            SampleKind::I32 => "i32",
            SampleKind::F16 => "f16",
            SampleKind::F32 => "f32",
            SampleKind::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// How samples of one `(audio format, bits per channel)` pair are stored, and the raw
/// range that maps onto the normalized `[-1, 1]` domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleDomain {
    pub audio_format: AudioFormat,
    pub bits_per_channel: u16,
    pub kind: SampleKind,
    pub raw_min: f64,
    pub raw_max: f64,
}

static SAMPLE_DOMAINS: [SampleDomain; 6] = [
    SampleDomain {
        audio_format: AudioFormat::Pcm,
        bits_per_channel: 8,
        kind: SampleKind::U8,
        raw_min: 0.0,
        raw_max: 255.0,
    },
    SampleDomain {
        audio_format: AudioFormat::Pcm,
        bits_per_channel: 16,
        kind: SampleKind::I16,
        raw_min: i16::MIN as f64,
        raw_max: i16::MAX as f64,
    },
    SampleDomain {
        audio_format: AudioFormat::Pcm,
        bits_per_channel: 32,
        kind: SampleKind::I32,
        raw_min: i32::MIN as f64,
        raw_max: i32::MAX as f64,
    },
    SampleDomain {
        audio_format: AudioFormat::Float,
        bits_per_channel: 16,
        kind: SampleKind::F16,
        raw_min: -1.0,
        raw_max: 1.0,
    },
    SampleDomain {
        audio_format: AudioFormat::Float,
        bits_per_channel: 32,
        kind: SampleKind::F32,
        raw_min: -1.0,
        raw_max: 1.0,
    },
    SampleDomain {
        audio_format: AudioFormat::Float,
        bits_per_channel: 64,
        kind: SampleKind::F64,
        raw_min: -1.0,
        raw_max: 1.0,
    },
];

impl SampleDomain {
    /// Find the storage descriptor for a format, or fail naming the unsupported bit depth
    pub fn lookup(audio_format: AudioFormat, bits_per_channel: u16) -> Result<&'static Self, WavError> {
        SAMPLE_DOMAINS
            .iter()
            .find(|d| d.audio_format == audio_format && d.bits_per_channel == bits_per_channel)
            .ok_or(WavError::UnsupportedBitsPerChannel {
                audio_format,
                bits: bits_per_channel,
            })
    }

    pub fn all() -> &'static [SampleDomain] {
        &SAMPLE_DOMAINS
    }

    /// `((raw - min) / (max - min)) * 2 - 1`
    #[inline]
    pub fn normalize(&self, raw: f64) -> f64 {
        ((raw - self.raw_min) / (self.raw_max - self.raw_min)) * 2.0 - 1.0
    }

    /// `(normalized + 1) / 2 * (max - min) + min`
    #[inline]
    pub fn denormalize(&self, normalized: f64) -> f64 {
        (normalized + 1.0) / 2.0 * (self.raw_max - self.raw_min) + self.raw_min
    }
}

/// Little-endian storage element of a `data` chunk
pub trait RawSample: Copy + Send + Sync + 'static {
    const KIND: SampleKind;

    fn read_le(bytes: &[u8]) -> Self;
    fn write_le(self, out: &mut Vec<u8>);
    fn to_f64(self) -> f64;
    /// Integer kinds round to nearest and saturate at the type bounds
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_int_raw_sample {
    ($ty:ty, $kind:expr) => {
        impl RawSample for $ty {
            const KIND: SampleKind = $kind;

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; core::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..core::mem::size_of::<$ty>()]);
                <$ty>::from_le_bytes(buf)
            }

            #[inline]
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                // `as` saturates and maps NaN to 0
                value.round() as $ty
            }
        }
    };
}

impl_int_raw_sample!(u8, SampleKind::U8);
impl_int_raw_sample!(i16, SampleKind::I16);
impl_int_raw_sample!(i32, SampleKind::I32);

impl RawSample for f16 {
    const KIND: SampleKind = SampleKind::F16;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f16::from_le_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }
}

impl RawSample for f32 {
    const KIND: SampleKind = SampleKind::F32;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl RawSample for f64 {
    const KIND: SampleKind = SampleKind::F64;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[..8]);
        f64::from_le_bytes(buf)
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_supported_pairs() {
        let cases = [
            (AudioFormat::Pcm, 8, SampleKind::U8),
            (AudioFormat::Pcm, 16, SampleKind::I16),
            (AudioFormat::Pcm, 32, SampleKind::I32),
            (AudioFormat::Float, 16, SampleKind::F16),
            (AudioFormat::Float, 32, SampleKind::F32),
            (AudioFormat::Float, 64, SampleKind::F64),
        ];
        for (format, bits, kind) in cases {
            let domain = SampleDomain::lookup(format, bits).unwrap();
            assert_eq!(domain.kind, kind);
            assert_eq!(kind.bits(), bits);
        }
    }

    #[test]
    fn test_lookup_rejects_unsupported_bits() {
        for (format, bits) in [
            (AudioFormat::Pcm, 24),
            (AudioFormat::Pcm, 64),
            (AudioFormat::Float, 8),
            (AudioFormat::Float, 24),
        ] {
            let err = SampleDomain::lookup(format, bits).unwrap_err();
            assert!(err.to_string().contains(&bits.to_string()));
        }
    }

    #[test]
    fn test_normalize_endpoints() {
        let pcm16 = SampleDomain::lookup(AudioFormat::Pcm, 16).unwrap();
        assert_eq!(pcm16.normalize(-32768.0), -1.0);
        assert_eq!(pcm16.normalize(32767.0), 1.0);

        let pcm8 = SampleDomain::lookup(AudioFormat::Pcm, 8).unwrap();
        assert_eq!(pcm8.normalize(0.0), -1.0);
        assert_eq!(pcm8.normalize(255.0), 1.0);

        let float = SampleDomain::lookup(AudioFormat::Float, 32).unwrap();
        assert_eq!(float.normalize(0.25), 0.25);
        assert_eq!(float.denormalize(-0.5), -0.5);
    }

    #[test]
    fn test_denormalize_inverts_normalize() {
        for domain in SampleDomain::all() {
            for raw in [domain.raw_min, domain.raw_max] {
                let back = domain.denormalize(domain.normalize(raw));
                assert!((back - raw).abs() < 1e-6 * raw.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_integer_from_f64_rounds_and_saturates() {
        assert_eq!(i16::from_f64(1.6), 2);
        assert_eq!(i16::from_f64(40_000.0), i16::MAX);
        assert_eq!(u8::from_f64(-3.0), 0);
        assert_eq!(i32::from_f64(f64::NAN), 0);
    }
}
