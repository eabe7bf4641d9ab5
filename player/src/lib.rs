//! Single-client network audio receiver pipeline.
//!
//! A peer sends compressed audio frames over a reliable byte stream, one
//! frame per write, and waits for a short acknowledgement token before
//! sending the next (stop-and-wait). This crate receives those frames,
//! decodes them to PCM, and plays them through a blocking audio sink at the
//! sink's real-time rate.
//!
//! The pipeline is two stages on separate OS threads joined by a bounded
//! hand-off queue:
//!
//! ```text
//! TCP peer ──> receiver ──> HandoffQueue<Frame> ──> worker ──> audio sink
//!               (ack)            (bounded)          (decode)   (blocking)
//! ```
//!
//! The sink's blocking write is the only clock: it paces the worker, the
//! full queue paces the receiver, and the withheld acknowledgement paces the
//! peer. Nothing is dropped under normal operation and end-to-end latency is
//! bounded by the queue capacity.
//!
//! - [`Server`]: TCP accept loop, one session at a time
//! - [`run_session`]: drive one connected session to completion
//! - [`run_receiver`] / [`run_worker`]: the individual stages, generic over
//!   transport, decoder, and sink seams for testing
//!
//! # Example
//!
//! ```no_run
//! use opuscast_player::{Server, ServerConfig};
//!
//! let server = Server::new(ServerConfig::default());
//! server.serve().unwrap();
//! ```

mod config;
mod decode;
mod error;
mod frame;
mod receiver;
mod server;
mod session;
mod sink;
mod stats;
mod worker;

pub use config::{PlayerConfig, ServerConfig};
pub use decode::{DecodeError, FrameDecoder, OpusFrameDecoder};
pub use error::{Error, Result};
pub use frame::Frame;
pub use receiver::run_receiver;
pub use server::Server;
pub use session::{run_session, SessionState};
pub use sink::{open_output, PcmSink};
pub use stats::{SessionStats, StatsSummary};
pub use worker::run_worker;
