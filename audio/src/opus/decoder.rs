//! Opus decoder.

use std::ptr;

use super::ffi::{self, OpusDecoder as OpusDecoderHandle};
use crate::pcm::Format;

/// Opus decoder error.
#[derive(Debug)]
pub enum DecoderError {
    /// Failed to create decoder.
    CreateFailed(String),
    /// Decoding failed.
    DecodeFailed(String),
}

impl std::fmt::Display for DecoderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateFailed(msg) => write!(f, "opus: decoder create failed: {}", msg),
            Self::DecodeFailed(msg) => write!(f, "opus: decode failed: {}", msg),
        }
    }
}

impl std::error::Error for DecoderError {}

/// Opus decoder.
///
/// One decoder instance carries the codec state for a single stream; it is
/// owned by exactly one thread and dropped at end of session.
pub struct Decoder {
    format: Format,
    handle: *mut OpusDecoderHandle,
}

// Safety: the decoder handle is not shared across threads.
unsafe impl Send for Decoder {}

impl Drop for Decoder {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ffi::opus_decoder_destroy(self.handle) };
            self.handle = ptr::null_mut();
        }
    }
}

impl Decoder {
    /// Creates a new Opus decoder for the given output format.
    ///
    /// The sample rate must be one of 8000, 12000, 16000, 24000, or 48000 Hz;
    /// libopus rejects anything else and the error is returned here.
    pub fn new(format: Format) -> Result<Self, DecoderError> {
        let mut error: i32 = 0;
        let handle = unsafe {
            ffi::opus_decoder_create(format.sample_rate as i32, format.channels() as i32, &mut error)
        };

        if handle.is_null() || error != ffi::OPUS_OK {
            return Err(DecoderError::CreateFailed(ffi::error_string(error)));
        }

        Ok(Self { format, handle })
    }

    /// Returns the configured output format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Decodes one Opus packet into the provided interleaved i16 buffer.
    ///
    /// `buf` must hold a whole number of sample frames; its frame capacity
    /// (`buf.len() / channels`) bounds the packet duration that can be
    /// decoded. Returns the number of sample frames written per channel.
    ///
    /// An empty `payload` performs packet loss concealment: libopus
    /// synthesizes plausible audio for the gap.
    pub fn decode_to(&mut self, payload: &[u8], buf: &mut [i16]) -> Result<i32, DecoderError> {
        let (data_ptr, data_len) = if payload.is_empty() {
            (ptr::null(), 0)
        } else {
            (payload.as_ptr(), payload.len() as i32)
        };

        let n = unsafe {
            ffi::opus_decode(
                self.handle,
                data_ptr,
                data_len,
                buf.as_mut_ptr(),
                (buf.len() / self.format.channels() as usize) as i32,
                0, // decode_fec
            )
        };

        if n < 0 {
            return Err(DecoderError::DecodeFailed(ffi::error_string(n)));
        }

        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::super::encoder::Encoder;
    use super::*;

    #[test]
    fn test_decoder_create() {
        let decoder = Decoder::new(Format::STEREO_48K).unwrap();
        assert_eq!(decoder.format().sample_rate, 48000);
        assert_eq!(decoder.format().channels(), 2);
    }

    #[test]
    fn test_decoder_create_bad_rate() {
        let result = Decoder::new(Format::mono(44100));
        assert!(matches!(result, Err(DecoderError::CreateFailed(_))));
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let format = Format::STEREO_48K;
        let mut encoder = Encoder::new_audio(format).unwrap();
        let mut decoder = Decoder::new(format).unwrap();

        // 20ms of a ramp signal at 48kHz stereo
        let pcm: Vec<i16> = (0..960 * 2).map(|i| (i * 7 % 32768) as i16).collect();
        let packet = encoder.encode(&pcm, 960).unwrap();

        let mut out = vec![0i16; 960 * 2];
        let frames = decoder.decode_to(&packet, &mut out).unwrap();
        assert_eq!(frames, 960);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let mut decoder = Decoder::new(Format::STEREO_48K).unwrap();
        let garbage = vec![0xffu8; 64];

        let mut out = vec![0i16; 960 * 2];
        assert!(matches!(
            decoder.decode_to(&garbage, &mut out),
            Err(DecoderError::DecodeFailed(_))
        ));
    }

    #[test]
    fn test_decode_empty_is_plc() {
        let mut decoder = Decoder::new(Format::STEREO_48K).unwrap();

        let mut out = vec![0i16; 960 * 2];
        let frames = decoder.decode_to(&[], &mut out).unwrap();
        assert_eq!(frames, 960);
    }
}
