//! Pipeline and server configuration.

use std::time::Duration;

use opuscast_audio::pcm::Format;

use crate::error::{Error, Result};

/// Configuration for one receive/decode/playback pipeline.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// PCM output format. The decoder and the sink both run at this rate.
    pub format: Format,
    /// Duration of one compressed frame. Bounds the PCM buffer the worker
    /// decodes into.
    pub frame_duration: Duration,
    /// Largest compressed frame the peer may send, in bytes.
    pub max_frame_bytes: usize,
    /// Hand-off queue capacity in frames. Bounds buffered audio (and so
    /// end-to-end latency) to `queue_depth * frame_duration`.
    pub queue_depth: usize,
    /// Acknowledgement token written back to the peer after each frame.
    /// The peer treats it as a pure flow-control pulse; the content is not
    /// parsed.
    pub ack_token: Vec<u8>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            format: Format::STEREO_48K,
            frame_duration: Duration::from_millis(20),
            max_frame_bytes: 640,
            queue_depth: 10,
            ack_token: b"ok".to_vec(),
        }
    }
}

impl PlayerConfig {
    /// Returns the number of sample frames per channel in one frame duration.
    pub fn frames_per_buffer(&self) -> usize {
        self.format.frames_in_duration(self.frame_duration)
    }

    /// Returns the interleaved i16 buffer length needed for one decoded frame.
    pub fn pcm_buffer_len(&self) -> usize {
        self.format.samples_in_duration(self.frame_duration)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_frame_bytes == 0 {
            return Err(Error::InvalidConfig("max_frame_bytes must be > 0".into()));
        }
        if self.queue_depth == 0 {
            return Err(Error::InvalidConfig("queue_depth must be > 0".into()));
        }
        if self.ack_token.is_empty() {
            return Err(Error::InvalidConfig("ack_token must not be empty".into()));
        }
        if self.frames_per_buffer() == 0 {
            return Err(Error::InvalidConfig(
                "frame_duration too short for sample rate".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the TCP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (host:port).
    pub addr: String,
    /// Pipeline configuration applied to every session.
    pub player: PlayerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:1028".to_string(),
            player: PlayerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.format.sample_rate, 48000);
        assert_eq!(config.format.channels(), 2);
        assert_eq!(config.max_frame_bytes, 640);
        assert_eq!(config.queue_depth, 10);
        assert_eq!(config.ack_token, b"ok");
        config.validate().unwrap();
    }

    #[test]
    fn test_buffer_sizing() {
        let config = PlayerConfig::default();
        // 20ms at 48kHz = 960 sample frames, 1920 interleaved stereo samples
        assert_eq!(config.frames_per_buffer(), 960);
        assert_eq!(config.pcm_buffer_len(), 1920);
    }

    #[test]
    fn test_validate_rejects_zeros() {
        let mut config = PlayerConfig::default();
        config.queue_depth = 0;
        assert!(config.validate().is_err());

        let mut config = PlayerConfig::default();
        config.max_frame_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = PlayerConfig::default();
        config.ack_token = Vec::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, "0.0.0.0:1028");
    }
}
