use core::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::{
    error::RiffResult,
    riff::{
        chunks::{DATA_CHUNK, FMT_CHUNK, WAVE_TYPE},
        container::{RiffFile, UnknownChunk, decode_riff, encode_riff},
    },
    traits::RiffChunk,
    types::RiffOptions,
    wav::{
        WaveChunk,
        coding::{AudioPayload, CodingMode},
        data::DataChunk,
        error::WavError,
        fmt::FormatChunk,
        list::ListChunk,
        track_info::TrackInfo,
        wave_registry,
    },
};

/// High-level WAVE file: format, optional track metadata, and the audio in one of the
/// coding-mode representations.
#[derive(Debug, Clone, PartialEq)]
pub struct WavFile {
    pub format: FormatChunk,
    pub track_info: Option<TrackInfo>,
    /// The decoded `LIST`/`INFO` chunk, including keys `TrackInfo` has no field for.
    /// On encode `track_info` is laid over it.
    pub info_list: Option<ListChunk>,
    pub audio: AudioPayload,
    /// Typed chunks other than the first `fmt `, `data` and `LIST`/`INFO` (e.g. `adtl`
    /// lists), written back between the metadata and the `data` chunk
    pub extra_chunks: Vec<WaveChunk>,
    /// Chunks without a WAVE codec, written back verbatim after `data`
    pub unknowns: Vec<UnknownChunk>,
}

impl WavFile {
    pub fn new(format: FormatChunk, audio: AudioPayload) -> Self {
        WavFile {
            format,
            track_info: None,
            info_list: None,
            audio,
            extra_chunks: Vec::new(),
            unknowns: Vec::new(),
        }
    }

    pub fn with_track_info(mut self, track_info: TrackInfo) -> Self {
        self.track_info = Some(track_info);
        self
    }

    /// The `INFO` list to write: `info_list` with `track_info` applied, `None` when empty
    pub fn info_chunk(&self) -> Option<ListChunk> {
        let mut list = self.info_list.clone().unwrap_or_else(ListChunk::info);
        if let Some(info) = &self.track_info {
            info.apply_to(&mut list);
        }
        (!list.is_empty()).then_some(list)
    }

    pub const fn channel_count(&self) -> u16 {
        self.format.channels
    }

    pub const fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    pub const fn mode(&self) -> CodingMode {
        self.audio.mode()
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        match &self.audio {
            AudioPayload::Channels(native) => native.frames(),
            AudioPayload::Float32(arr) => arr.ncols(),
            AudioPayload::RawBlob(bytes) => self.raw_frames(bytes.len()),
            AudioPayload::RawBuffer(bytes) => self.raw_frames(bytes.len()),
        }
    }

    fn raw_frames(&self, len: usize) -> usize {
        len.checked_div(self.format.block_align as usize)
            .unwrap_or(0)
    }

    pub fn duration(&self) -> Duration {
        if self.format.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.format.sample_rate as f64)
    }
}

impl Display for WavFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "WAV File:")?;
        writeln!(f, "  {}", self.format)?;
        writeln!(f, "  Mode: {}", self.mode())?;
        writeln!(f, "  Frames: {}", self.frames())?;
        if let Some(info) = &self.track_info {
            writeln!(f, "  Track Info: {:?}", info)?;
        }
        if let Some(list) = &self.info_list {
            writeln!(f, "  INFO Keys: {:?}", list.keys().collect::<Vec<_>>())?;
        }
        writeln!(
            f,
            "  Extra Chunks: {:?}",
            self.extra_chunks.iter().map(|c| c.id()).collect::<Vec<_>>()
        )?;
        write!(
            f,
            "  Unknown Chunks: {:?}",
            self.unknowns.iter().map(|c| c.id).collect::<Vec<_>>()
        )
    }
}

/// Decode a WAVE file with default options
pub fn decode_wav(bytes: impl AsRef<[u8]>, mode: CodingMode) -> RiffResult<WavFile> {
    decode_wav_with_options(bytes, mode, RiffOptions::default())
}

pub fn decode_wav_with_options(
    bytes: impl AsRef<[u8]>,
    mode: CodingMode,
    options: RiffOptions,
) -> RiffResult<WavFile> {
    let riff = decode_riff(bytes.as_ref(), wave_registry(), options)?;
    if riff.riff_type != WAVE_TYPE {
        tracing::warn!(riff_type = %riff.riff_type, "decoding non-WAVE RIFF container as WAVE");
    }

    let mut format = None;
    let mut data = None;
    let mut info_list = None;
    let mut extra_chunks = Vec::new();

    for chunk in riff.content {
        match chunk {
            WaveChunk::Format(fmt) if format.is_none() => format = Some(fmt),
            WaveChunk::Data(d) if data.is_none() => data = Some(d),
            WaveChunk::List(list) if list.is_info() && info_list.is_none() => {
                info_list = Some(list)
            }
            other => extra_chunks.push(other),
        }
    }

    let track_info = info_list.as_ref().map(TrackInfo::from_list_chunk);
    let format = format.ok_or(WavError::MissingChunk(FMT_CHUNK))?;
    let data = data.ok_or(WavError::MissingChunk(DATA_CHUNK))?;

    tracing::debug!(
        format = %format.audio_format,
        channels = format.channels,
        bits = format.bits_per_channel,
        data_len = data.len(),
        %mode,
        "decoding WAVE audio"
    );

    let audio = AudioPayload::decode(
        data.into_blob(),
        mode,
        || format.sample_domain(),
        format.channels as usize,
    )?;

    Ok(WavFile {
        format,
        track_info,
        info_list,
        audio,
        extra_chunks,
        unknowns: riff.unknowns,
    })
}

/// Encode a WAVE file with default options. The coding mode is the variant of
/// `file.audio`.
pub fn encode_wav(file: &WavFile) -> RiffResult<Vec<u8>> {
    encode_wav_with_options(file, RiffOptions::default())
}

pub fn encode_wav_with_options(file: &WavFile, options: RiffOptions) -> RiffResult<Vec<u8>> {
    let data = file
        .audio
        .encode(|| file.format.sample_domain(), file.format.channels as usize)?;

    let mut riff = RiffFile::new(WAVE_TYPE);
    riff.content.push(WaveChunk::Format(file.format));
    if let Some(list) = file.info_chunk() {
        riff.content.push(WaveChunk::List(list));
    }
    riff.content.extend(file.extra_chunks.iter().cloned());
    riff.content.push(WaveChunk::Data(DataChunk::new(data)));
    riff.unknowns = file.unknowns.clone();

    encode_riff(&riff, wave_registry(), options)
}
