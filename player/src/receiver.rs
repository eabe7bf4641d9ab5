//! Frame receiver: network reads, acknowledgements, enqueue.

use std::io::{Read, Write};

use opuscast_buffer::HandoffQueue;
use tracing::{debug, info, warn};

use crate::config::PlayerConfig;
use crate::frame::Frame;
use crate::stats::SessionStats;

/// Runs the receive loop until the stream ends.
///
/// Each successful read is one whole compressed frame: the peer sends one
/// frame per write and waits for the acknowledgement token before sending
/// the next, so reads never see partial or combined frames. That
/// stop-and-wait discipline is a protocol precondition, not something this
/// loop can verify from the byte stream.
///
/// Per frame: read up to `max_frame_bytes`, write the acknowledgement token
/// straight back (before enqueueing, so ack latency is independent of queue
/// contention), then push the frame, blocking while the queue is full.
/// That blocked push is how sink backpressure reaches the peer.
///
/// The loop ends on clean EOF (`Ok`), on a transport error (`Err`), or
/// silently when the queue is closed under it because the worker died. It
/// never tears the worker down itself; the caller closes the queue's write
/// side so the worker can drain.
pub fn run_receiver<T>(
    transport: &mut T,
    queue: &HandoffQueue<Frame>,
    config: &PlayerConfig,
    stats: &SessionStats,
) -> std::io::Result<()>
where
    T: Read + Write,
{
    let mut buf = vec![0u8; config.max_frame_bytes];

    loop {
        let n = match transport.read(&mut buf) {
            Ok(0) => {
                info!("peer closed connection");
                return Ok(());
            }
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("receive failed: {}", e);
                return Err(e);
            }
        };

        // Ack first: the peer may send the next frame as soon as it sees
        // this, while we are still waiting for queue space.
        if let Err(e) = transport.write_all(&config.ack_token) {
            warn!("ack write failed: {}", e);
            return Err(e);
        }

        stats.record_received(n);

        if let Err(e) = queue.push(Frame::copy_from(&buf[..n])) {
            // The worker closed the queue; its error is the session's.
            debug!("stopping receive loop: {}", e);
            return Ok(());
        }
    }
}
