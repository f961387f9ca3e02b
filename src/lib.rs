// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms
#![allow(clippy::result_large_err)] // Allow large error types for comprehensive error handling
#![allow(clippy::collapsible_if)] // Sometimes clearer to have separate conditions
#![allow(clippy::missing_panics_doc)] // Panics are converted to proper errors where needed
#![allow(clippy::needless_borrows_for_generic_args)] // Sometimes clearer with explicit borrows
#![allow(clippy::unnecessary_cast)] // Explicit casts for clarity

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::vec_box)] // Avoids using `Vec<Box<T>>` when unnecessary
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`
#![warn(clippy::panic)] // Avoids using `panic!` in production code

// Maintainability
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions

//! RIFF container codec with a pluggable chunk registry, and a WAVE layer on top of it
//! that exposes the `data` chunk as raw bytes or as per-channel sample arrays.

pub mod error;
pub mod riff;
pub mod traits;
pub mod types;

#[cfg(feature = "wav")]
pub mod wav;

pub use crate::{
    error::{RiffError, RiffResult},
    riff::{ChunkID, ChunkRegistry, RiffFile, UnknownChunk, decode_riff, encode_riff},
    traits::{ChunkCodec, FnCodec, RiffChunk},
    types::{ByteSource, OpenOptions, RiffOptions},
};

#[cfg(feature = "wav")]
pub use crate::wav::{
    AudioPayload, CodingMode, FormatChunk, TrackInfo, WavFile, decode_wav, encode_wav,
};

#[cfg(feature = "wav")]
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Read and decode a WAVE file from disk.
///
/// The file is memory mapped unless `open_options` says otherwise; the chosen `mode`
/// decides how the `data` chunk is exposed.
///
/// # Example
///
/// ```no_run
/// use riff_wave_io::{CodingMode, OpenOptions, RiffOptions, read_wav};
///
/// let wav = read_wav(
///     "voice.wav",
///     CodingMode::ChannelsFloat32,
///     OpenOptions::default(),
///     RiffOptions::default(),
/// )?;
/// println!("{} frames over {:?}", wav.frames(), wav.duration());
/// # Ok::<(), riff_wave_io::RiffError>(())
/// ```
#[cfg(feature = "wav")]
pub fn read_wav<P: AsRef<Path>>(
    fp: P,
    mode: CodingMode,
    open_options: OpenOptions,
    options: RiffOptions,
) -> RiffResult<WavFile> {
    let path = fp.as_ref();
    let source = ByteSource::open(path, open_options)?;
    tracing::debug!(path = %path.display(), len = source.len(), "read WAVE source");
    wav::decode_wav_with_options(source, mode, options)
}

/// Encode `wav` and write it to `fp`, replacing any existing file
///
/// # Example
///
/// ```no_run
/// use ndarray::array;
/// use riff_wave_io::{AudioPayload, FormatChunk, RiffOptions, WavFile, write_wav};
/// use riff_wave_io::wav::AudioFormat;
///
/// let format = FormatChunk::new(AudioFormat::Pcm, 1, 44_100, 16);
/// let wav = WavFile::new(format, AudioPayload::Float32(array![[0.0f32, 0.5, -0.5]]));
/// write_wav("tone.wav", &wav, RiffOptions::default())?;
/// # Ok::<(), riff_wave_io::RiffError>(())
/// ```
#[cfg(feature = "wav")]
pub fn write_wav<P: AsRef<Path>>(fp: P, wav: &WavFile, options: RiffOptions) -> RiffResult<()> {
    let path = fp.as_ref();
    let bytes = wav::encode_wav_with_options(wav, options)?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), len = bytes.len(), "wrote WAVE file");
    Ok(())
}
