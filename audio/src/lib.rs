//! Audio codec and playback.
//!
//! This crate provides the audio-facing pieces of opuscast:
//!
//! - `opus`: Opus decoding (and encoding, for test-signal generation) via
//!   libopus FFI
//! - `pcm`: PCM format definitions and duration/size arithmetic
//! - `playback`: blocking audio output via PortAudio
//!
//! # Example
//!
//! ```ignore
//! use opuscast_audio::{opus, pcm::Format, playback};
//!
//! let format = Format::STEREO_48K;
//! let mut decoder = opus::Decoder::new(format)?;
//! let mut stream = playback::OutputStream::open(format, 960)?;
//! stream.start()?;
//!
//! let mut pcm = vec![0i16; 960 * 2];
//! let frames = decoder.decode_to(packet, &mut pcm)?;
//! stream.write(&pcm[..frames as usize * 2])?;
//! ```

pub mod opus;
pub mod pcm;
pub mod playback;

pub use pcm::Format;
