//! Opus audio codec.
//!
//! Safe wrappers over libopus via FFI. The receiver pipeline only decodes;
//! the encoder exists for generating real Opus packets in tests and test
//! tooling.
//!
//! # Example
//!
//! ```ignore
//! use opuscast_audio::opus::Decoder;
//! use opuscast_audio::pcm::Format;
//!
//! let mut decoder = Decoder::new(Format::STEREO_48K)?;
//! let mut pcm = vec![0i16; 960 * 2]; // 20ms at 48kHz stereo
//! let frames = decoder.decode_to(&packet, &mut pcm)?;
//! ```

mod decoder;
mod encoder;
mod ffi;

pub use decoder::{Decoder, DecoderError};
pub use encoder::{Application, Encoder, EncoderError};
