//! Opus encoder.
//!
//! The receiver pipeline never encodes; this exists so tests and test
//! tooling can produce real Opus packets to feed through the decoder.

use std::ptr;

use super::ffi::{self, OpusEncoder as OpusEncoderHandle};
use crate::pcm::Format;

/// Opus application type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    /// Best quality for voice signals.
    VoIP,
    /// Best quality for non-voice signals.
    Audio,
    /// Minimum possible coding delay.
    RestrictedLowdelay,
}

impl Application {
    fn to_ffi(self) -> i32 {
        match self {
            Self::VoIP => ffi::OPUS_APPLICATION_VOIP,
            Self::Audio => ffi::OPUS_APPLICATION_AUDIO,
            Self::RestrictedLowdelay => ffi::OPUS_APPLICATION_RESTRICTED_LOWDELAY,
        }
    }
}

/// Opus encoder error.
#[derive(Debug)]
pub enum EncoderError {
    /// Failed to create encoder.
    CreateFailed(String),
    /// Encoding failed.
    EncodeFailed(String),
    /// Failed to set option.
    SetOptionFailed(String),
}

impl std::fmt::Display for EncoderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateFailed(msg) => write!(f, "opus: encoder create failed: {}", msg),
            Self::EncodeFailed(msg) => write!(f, "opus: encode failed: {}", msg),
            Self::SetOptionFailed(msg) => write!(f, "opus: set option failed: {}", msg),
        }
    }
}

impl std::error::Error for EncoderError {}

/// Opus encoder.
pub struct Encoder {
    format: Format,
    handle: *mut OpusEncoderHandle,
}

// Safety: the encoder handle is not shared across threads.
unsafe impl Send for Encoder {}

impl Drop for Encoder {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ffi::opus_encoder_destroy(self.handle) };
            self.handle = ptr::null_mut();
        }
    }
}

impl Encoder {
    /// Creates a new Opus encoder for the given input format.
    pub fn new(format: Format, application: Application) -> Result<Self, EncoderError> {
        let mut error: i32 = 0;
        let handle = unsafe {
            ffi::opus_encoder_create(
                format.sample_rate as i32,
                format.channels() as i32,
                application.to_ffi(),
                &mut error,
            )
        };

        if handle.is_null() || error != ffi::OPUS_OK {
            return Err(EncoderError::CreateFailed(ffi::error_string(error)));
        }

        Ok(Self { format, handle })
    }

    /// Creates a new VoIP encoder.
    pub fn new_voip(format: Format) -> Result<Self, EncoderError> {
        Self::new(format, Application::VoIP)
    }

    /// Creates a new general-audio encoder.
    pub fn new_audio(format: Format) -> Result<Self, EncoderError> {
        Self::new(format, Application::Audio)
    }

    /// Returns the configured input format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Encodes PCM samples to one Opus packet.
    ///
    /// # Parameters
    /// - `pcm`: input interleaved samples (`frame_size * channels` values)
    /// - `frame_size`: number of sample frames per channel
    pub fn encode(&mut self, pcm: &[i16], frame_size: i32) -> Result<Vec<u8>, EncoderError> {
        let mut buf = vec![0u8; 4000]; // max Opus packet size

        let n = unsafe {
            ffi::opus_encode(
                self.handle,
                pcm.as_ptr(),
                frame_size,
                buf.as_mut_ptr(),
                buf.len() as i32,
            )
        };

        if n < 0 {
            return Err(EncoderError::EncodeFailed(ffi::error_string(n)));
        }

        buf.truncate(n as usize);
        Ok(buf)
    }

    /// Sets the target bitrate in bits per second.
    pub fn set_bitrate(&mut self, bitrate: i32) -> Result<(), EncoderError> {
        let ret = unsafe { ffi::opus_encoder_ctl(self.handle, ffi::OPUS_SET_BITRATE_REQUEST, bitrate) };

        if ret != ffi::OPUS_OK {
            return Err(EncoderError::SetOptionFailed(ffi::error_string(ret)));
        }

        Ok(())
    }
}
