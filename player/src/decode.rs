//! Decoder seam between the pipeline and the codec.

use opuscast_audio::opus;
use opuscast_audio::pcm::Format;

use crate::error::{Error, Result};

/// Per-frame decode failure.
///
/// Recoverable: the worker drops the offending frame and keeps going.
#[derive(Debug, thiserror::Error)]
#[error("decode failed: {0}")]
pub struct DecodeError(pub String);

/// Decodes one compressed frame into interleaved i16 PCM.
///
/// Implementations write at most `pcm.len()` samples (a whole number of
/// sample frames) and return the number of sample frames produced per
/// channel.
pub trait FrameDecoder: Send {
    fn decode(&mut self, payload: &[u8], pcm: &mut [i16]) -> std::result::Result<usize, DecodeError>;
}

/// The production decoder: one Opus decoder instance per session.
pub struct OpusFrameDecoder {
    inner: opus::Decoder,
}

impl OpusFrameDecoder {
    /// Creates a decoder for the session's output format.
    ///
    /// Failure here is fatal to the session: a decoder that cannot be
    /// configured cannot self-heal, so the caller aborts startup.
    pub fn new(format: Format) -> Result<Self> {
        let inner = opus::Decoder::new(format).map_err(|e| Error::DecoderInit(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl FrameDecoder for OpusFrameDecoder {
    fn decode(&mut self, payload: &[u8], pcm: &mut [i16]) -> std::result::Result<usize, DecodeError> {
        let frames = self
            .inner
            .decode_to(payload, pcm)
            .map_err(|e| DecodeError(e.to_string()))?;
        Ok(frames as usize)
    }
}
