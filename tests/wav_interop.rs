#![cfg(feature = "wav")]

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::{Array2, array};
use riff_wave_io::{
    AudioPayload, ChunkID, CodingMode, FormatChunk, RiffError, TrackInfo, WavFile, decode_wav,
    encode_wav,
    wav::{AudioFormat, NativeChannels, SampleDomain, SampleKind},
};

fn hound_bytes<S: hound::Sample + Copy>(spec: WavSpec, interleaved: &[S]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in interleaved {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Deterministic test signal in `[-1, 1]`, including both endpoints
fn signal(channels: usize, frames: usize) -> Array2<f32> {
    Array2::from_shape_fn((channels, frames), |(c, i)| match i {
        0 => -1.0,
        1 => 1.0,
        _ => ((i as f32 * 0.37 + c as f32).sin() * 0.9).clamp(-1.0, 1.0),
    })
}

#[test]
fn test_reads_hound_pcm16() {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let interleaved: Vec<i16> = vec![0, 100, -32768, 32767, 1234, -1234, 5, -5];
    let bytes = hound_bytes(spec, &interleaved);

    let wav = decode_wav(&bytes, CodingMode::ChannelsFmt).unwrap();
    assert_eq!(wav.format, FormatChunk::new(AudioFormat::Pcm, 2, 44_100, 16));
    assert_eq!(
        wav.audio,
        AudioPayload::Channels(NativeChannels::I16(array![
            [0, -32768, 1234, 5],
            [100, 32767, -1234, -5]
        ]))
    );

    let float = decode_wav(&bytes, CodingMode::ChannelsFloat32).unwrap();
    let AudioPayload::Float32(channels) = float.audio else {
        panic!("expected float32 payload");
    };
    assert_eq!(channels[[0, 1]], -1.0);
    assert_eq!(channels[[1, 1]], 1.0);
}

#[test]
fn test_reads_hound_pcm8_as_unsigned() {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 8,
        sample_format: SampleFormat::Int,
    };
    let bytes = hound_bytes(spec, &[-128i8, 0, 127]);

    let wav = decode_wav(&bytes, CodingMode::ChannelsFmt).unwrap();
    assert_eq!(
        wav.audio,
        AudioPayload::Channels(NativeChannels::U8(array![[0u8, 128, 255]]))
    );
}

#[test]
fn test_hound_reads_our_pcm16() {
    let native = array![[0i16, -32768, 1234, 5], [100, 32767, -1234, -5]];
    let wav = WavFile::new(
        FormatChunk::new(AudioFormat::Pcm, 2, 48_000, 16),
        AudioPayload::Channels(NativeChannels::I16(native)),
    )
    .with_track_info(TrackInfo {
        artist: Some("Someone".into()),
        ..Default::default()
    });
    let bytes = encode_wav(&wav).unwrap();

    let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48_000);
    assert_eq!(spec.bits_per_sample, 16);
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples, vec![0, 100, -32768, 32767, 1234, -1234, 5, -5]);
}

#[test]
fn test_hound_reads_our_float32() {
    let channels = signal(2, 64);
    let wav = WavFile::new(
        FormatChunk::new(AudioFormat::Float, 2, 44_100, 32),
        AudioPayload::Float32(channels.clone()),
    );
    let bytes = encode_wav(&wav).unwrap();

    let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.spec().sample_format, SampleFormat::Float);
    let samples: Vec<f32> = reader.samples::<f32>().map(Result::unwrap).collect();
    let expected: Vec<f32> = channels.t().iter().copied().collect();
    assert_eq!(samples.len(), expected.len());
    for (a, b) in samples.iter().zip(&expected) {
        assert!((a - b).abs() <= 1e-6, "{} vs {}", a, b);
    }
}

#[test]
fn test_float32_round_trip_every_supported_format() {
    for domain in SampleDomain::all() {
        for channels in [1u16, 2, 3] {
            let input = signal(channels as usize, 32);
            let format = FormatChunk::new(
                domain.audio_format,
                channels,
                22_050,
                domain.bits_per_channel,
            );
            let wav = WavFile::new(format, AudioPayload::Float32(input.clone()));
            let decoded = decode_wav(encode_wav(&wav).unwrap(), CodingMode::ChannelsFloat32)
                .unwrap();

            let AudioPayload::Float32(output) = decoded.audio else {
                panic!("expected float32 payload");
            };
            assert_eq!(output.dim(), input.dim());

            let tolerance = match domain.kind {
                SampleKind::F16 => 1e-3,
                SampleKind::F32 | SampleKind::F64 => 1e-6,
                _ => (1.0 / (domain.raw_max - domain.raw_min)) as f32 + 1e-6,
            };
            for (a, b) in input.iter().zip(output.iter()) {
                assert!(
                    (a - b).abs() <= tolerance,
                    "{} {}ch: {} vs {}",
                    domain.kind,
                    channels,
                    a,
                    b
                );
                assert!((-1.0..=1.0).contains(b));
            }
        }
    }
}

#[test]
fn test_channels_fmt_round_trip_is_exact() {
    let native = NativeChannels::I32(array![[i32::MIN, -1, 0], [1, 7, i32::MAX]]);
    let wav = WavFile::new(
        FormatChunk::new(AudioFormat::Pcm, 2, 96_000, 32),
        AudioPayload::Channels(native),
    );
    let decoded = decode_wav(encode_wav(&wav).unwrap(), CodingMode::ChannelsFmt).unwrap();
    assert_eq!(decoded, wav);
}

#[test]
fn test_unknown_riff_type_round_trip() {
    use riff_wave_io::{ChunkRegistry, RiffFile, RiffOptions, UnknownChunk, decode_riff, encode_riff};

    let registry = ChunkRegistry::<riff_wave_io::wav::WaveChunk>::new();
    let mut file = RiffFile::new(ChunkID::new(b"AVI "));
    file.unknowns.push(UnknownChunk::new(ChunkID::new(b"hdrl"), vec![1, 2, 3]));
    file.unknowns.push(UnknownChunk::new(ChunkID::new(b"movi"), vec![]));

    for options in [RiffOptions::default(), RiffOptions::new().pad_odd_chunks(true)] {
        let bytes = encode_riff(&file, &registry, options).unwrap();
        let size = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        assert_eq!(size + 8, bytes.len());
        assert_eq!(decode_riff(&bytes, &registry, options).unwrap(), file);
    }
}

#[test]
fn test_bad_tag_lengths_are_rejected() {
    for tag in ["", "WAV", "WAVEX"] {
        let err = ChunkID::try_from(tag).unwrap_err();
        assert!(matches!(err, RiffError::InvalidTag(_)), "{tag}: {err}");
    }
    assert!(ChunkID::try_from("WAVE").is_ok());
}
