//! Sink seam between the pipeline and the audio device.

use std::io;

use opuscast_audio::playback::OutputStream;

use crate::config::PlayerConfig;
use crate::error::{Error, Result};

/// A blocking PCM sink.
///
/// `write` accepts interleaved i16 samples and blocks for roughly their
/// playback duration. That blocking is the pipeline's only clock: it paces
/// the worker, which in turn backpressures the receiver through the
/// hand-off queue. A write error means the audio path is broken and ends
/// the session.
pub trait PcmSink: Send {
    fn write(&mut self, samples: &[i16]) -> io::Result<()>;
}

impl PcmSink for OutputStream {
    fn write(&mut self, samples: &[i16]) -> io::Result<()> {
        OutputStream::write(self, samples)
    }
}

/// Opens and starts a blocking output stream on the default device,
/// configured for the pipeline's format and frame size.
pub fn open_output(config: &PlayerConfig) -> Result<OutputStream> {
    let mut stream =
        OutputStream::open(config.format, config.frames_per_buffer()).map_err(Error::SinkInit)?;
    stream.start().map_err(Error::SinkInit)?;
    Ok(stream)
}
