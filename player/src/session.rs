//! Session lifecycle: one connected client from accept to teardown.

use std::fmt;
use std::io::{Read, Write};
use std::thread;

use opuscast_buffer::HandoffQueue;
use tracing::{debug, info};

use crate::config::PlayerConfig;
use crate::decode::FrameDecoder;
use crate::error::Result;
use crate::frame::Frame;
use crate::receiver::run_receiver;
use crate::sink::PcmSink;
use crate::stats::{SessionStats, StatsSummary};
use crate::worker::run_worker;

/// Pipeline state over one session's lifetime.
///
/// `Idle` → `Streaming` when a client connects, → `Draining` once the
/// stream ends (the worker keeps playing whatever is already queued),
/// → `Closed` when both stages have stopped and resources are released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Streaming,
    Draining,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Streaming => "streaming",
            SessionState::Draining => "draining",
            SessionState::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

/// Drives one session to completion.
///
/// Constructs the hand-off queue for this session, runs the worker on its
/// own named thread and the receiver on the calling thread, and tears both
/// down in order: when the receiver sees end-of-stream (or fails) the
/// queue's write side is closed, the worker drains what is queued, and the
/// worker thread is joined before this returns. The queue, decoder, and
/// sink all die with this call; the transport is closed by the caller.
///
/// Returns the session's counters on a normally-ended session. A transport
/// error surfaces as `Error::Io`, a dead audio path as `Error::Sink`; both
/// leave the process free to accept another connection.
pub fn run_session<T, D, S>(
    transport: &mut T,
    mut decoder: D,
    mut sink: S,
    config: &PlayerConfig,
) -> Result<StatsSummary>
where
    T: Read + Write,
    D: FrameDecoder,
    S: PcmSink,
{
    config.validate()?;

    let stats = SessionStats::new();
    let queue = HandoffQueue::<Frame>::new(config.queue_depth);

    debug!("session state: {}", SessionState::Streaming);

    let (recv_result, worker_result) = thread::scope(|scope| {
        let worker_queue = queue.clone();
        let worker_stats = &stats;
        let worker = match thread::Builder::new()
            .name("decode-playback".to_string())
            .spawn_scoped(scope, move || {
                run_worker(&worker_queue, &mut decoder, &mut sink, config, worker_stats)
            }) {
            Ok(handle) => handle,
            Err(e) => return (Err(e), Ok(())),
        };

        let recv_result = run_receiver(transport, &queue, config, &stats);

        debug!("session state: {}", SessionState::Draining);
        queue.close_write();

        let worker_result = match worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        };

        (recv_result, worker_result)
    });

    debug!("session state: {}", SessionState::Closed);

    // A dead audio path outranks a transport error: the poisoned queue is
    // usually what ended the receive loop in the first place.
    worker_result?;
    recv_result?;

    let summary = stats.snapshot();
    info!("session ended: {}", summary);
    Ok(summary)
}
