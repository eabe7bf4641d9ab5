//! TCP server: accept one client at a time and run its session.

use std::net::TcpListener;

use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::decode::OpusFrameDecoder;
use crate::error::{Error, Result};
use crate::session::{run_session, SessionState};
use crate::sink::open_output;

/// Single-client audio receiver server.
///
/// Listens on a TCP address and serves connections sequentially: each
/// accepted client gets a fresh decoder, a fresh sink, and a fresh session
/// pipeline. When a session ends, cleanly or not, the connection is
/// closed and the server goes back to listening.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Creates a server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds the listen address and serves connections until a listener
    /// error occurs.
    ///
    /// Session-level failures (peer disconnects, transport errors, a broken
    /// audio path) are logged and never escape this loop; the next client
    /// gets a clean slate, including a re-initialized sink.
    pub fn serve(&self) -> Result<()> {
        self.config.player.validate()?;

        let listener = TcpListener::bind(&self.config.addr)?;
        info!("listening on {}", listener.local_addr()?);

        loop {
            debug!("session state: {}", SessionState::Idle);
            let (mut stream, peer) = listener.accept()?;
            info!("accepted connection from {}", peer);

            let decoder = match OpusFrameDecoder::new(self.config.player.format) {
                Ok(decoder) => decoder,
                Err(e) => {
                    error!("dropping connection from {}: {}", peer, e);
                    continue;
                }
            };

            let sink = match open_output(&self.config.player) {
                Ok(sink) => sink,
                Err(e) => {
                    error!("dropping connection from {}: {}", peer, e);
                    continue;
                }
            };

            match run_session(&mut stream, decoder, sink, &self.config.player) {
                Ok(_) => {}
                Err(Error::Io(e)) => warn!("session with {} ended: {}", peer, e),
                Err(e) => error!("session with {} failed: {}", peer, e),
            }
            // Dropping the stream closes the transport; the loop re-enters
            // the accept wait for the next client.
        }
    }
}
