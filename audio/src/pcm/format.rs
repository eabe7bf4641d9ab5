//! PCM audio format definitions.

use std::time::Duration;

/// Describes a linear PCM format.
/// Only 16-bit signed little-endian interleaved samples are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 16000, 48000).
    pub sample_rate: u32,
    /// True for stereo (2 channels), false for mono (1 channel).
    pub stereo: bool,
}

impl Format {
    /// Creates a new format with the given sample rate and mono audio.
    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            stereo: false,
        }
    }

    /// Creates a new format with the given sample rate and stereo audio.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            stereo: true,
        }
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub const fn channels(&self) -> u32 {
        if self.stereo { 2 } else { 1 }
    }

    /// Returns the sample bit depth. Always 16.
    pub const fn depth(&self) -> u32 {
        16
    }

    /// Returns the number of bytes per sample frame.
    /// For 16-bit audio: 2 bytes for mono, 4 bytes for stereo.
    pub const fn frame_bytes(&self) -> usize {
        if self.stereo { 4 } else { 2 }
    }

    /// Returns the number of sample frames per channel in the given duration.
    pub fn frames_in_duration(&self, duration: Duration) -> usize {
        (self.sample_rate as u128 * duration.as_micros() / 1_000_000) as usize
    }

    /// Returns the number of interleaved i16 samples in the given duration.
    pub fn samples_in_duration(&self, duration: Duration) -> usize {
        self.frames_in_duration(duration) * self.channels() as usize
    }

    /// Returns the number of bytes of PCM data in the given duration.
    pub fn bytes_in_duration(&self, duration: Duration) -> usize {
        self.frames_in_duration(duration) * self.frame_bytes()
    }

    /// Returns the playback duration of the given number of sample frames.
    pub fn duration(&self, frames: usize) -> Duration {
        Duration::from_micros((frames as u64 * 1_000_000) / self.sample_rate as u64)
    }
}

// Common format presets
impl Format {
    /// 16kHz mono (common for voice)
    pub const MONO_16K: Format = Format::mono(16000);
    /// 48kHz mono
    pub const MONO_48K: Format = Format::mono(48000);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_channels() {
        assert_eq!(Format::mono(16000).channels(), 1);
        assert_eq!(Format::stereo(48000).channels(), 2);
    }

    #[test]
    fn test_format_frame_bytes() {
        assert_eq!(Format::MONO_16K.frame_bytes(), 2);
        assert_eq!(Format::STEREO_48K.frame_bytes(), 4);
    }

    #[test]
    fn test_frames_in_duration() {
        let format = Format::STEREO_48K;
        // 20ms at 48kHz = 960 sample frames per channel
        assert_eq!(format.frames_in_duration(Duration::from_millis(20)), 960);
        assert_eq!(format.samples_in_duration(Duration::from_millis(20)), 1920);
        assert_eq!(format.bytes_in_duration(Duration::from_millis(20)), 3840);
    }

    #[test]
    fn test_duration() {
        let format = Format::STEREO_48K;
        assert_eq!(format.duration(960), Duration::from_millis(20));
        assert_eq!(format.duration(48000), Duration::from_secs(1));
    }

    #[test]
    fn test_presets() {
        assert_eq!(Format::STEREO_48K.sample_rate, 48000);
        assert!(Format::STEREO_48K.stereo);
        assert!(!Format::MONO_48K.stereo);
    }
}
