//! Decode-and-playback worker.

use std::io;

use opuscast_buffer::HandoffQueue;
use tracing::{debug, error, warn};

use crate::config::PlayerConfig;
use crate::decode::FrameDecoder;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::sink::PcmSink;
use crate::stats::SessionStats;

/// Runs the decode-and-playback loop until the queue is drained or the
/// sink fails.
///
/// Each popped frame is decoded into a PCM buffer sized for one frame
/// duration and written to the sink. The sink write blocks for roughly the
/// frame's playback time, which is what keeps this loop at the device's
/// real-time rate.
///
/// A frame that fails to decode is dropped with a warning and playback
/// continues: the result is a gap in the audio, not a dead session. A sink
/// write error is fatal: the queue is poisoned so a receiver blocked
/// mid-push wakes up, and the error is returned.
pub fn run_worker<D, S>(
    queue: &HandoffQueue<Frame>,
    decoder: &mut D,
    sink: &mut S,
    config: &PlayerConfig,
    stats: &SessionStats,
) -> Result<()>
where
    D: FrameDecoder,
    S: PcmSink,
{
    let mut pcm = vec![0i16; config.pcm_buffer_len()];
    let channels = config.format.channels() as usize;

    loop {
        let frame = match queue.pop() {
            Ok(frame) => frame,
            Err(_) => {
                debug!("frame queue drained");
                return Ok(());
            }
        };

        let frames = match decoder.decode(frame.payload(), &mut pcm) {
            Ok(frames) => frames,
            Err(e) => {
                warn!("dropping undecodable frame ({} bytes): {}", frame.len(), e);
                stats.record_dropped();
                continue;
            }
        };
        stats.record_decoded();

        let samples = frames * channels;
        if let Err(e) = sink.write(&pcm[..samples]) {
            error!("sink write failed: {}", e);
            queue.close_with_error(io::Error::new(e.kind(), e.to_string()));
            return Err(Error::Sink(e));
        }
        stats.record_played(samples);
    }
}
