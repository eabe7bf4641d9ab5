//! opuscastd - network audio receiver daemon.
//!
//! Listens for a single TCP client streaming Opus frames under a
//! stop-and-wait acknowledgement discipline, decodes them, and plays them
//! on the default audio output device.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use opuscast_audio::pcm::Format;
use opuscast_audio::playback;
use opuscast_player::{PlayerConfig, Server, ServerConfig};

/// Network audio receiver daemon.
#[derive(Parser, Debug)]
#[command(name = "opuscastd")]
#[command(about = "Receive an Opus audio stream over TCP and play it")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:1028")]
    listen: String,

    /// PCM sample rate in Hz (8000, 12000, 16000, 24000, or 48000)
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// Number of audio channels (1 or 2)
    #[arg(long, default_value_t = 2)]
    channels: u32,

    /// Compressed frame duration in milliseconds
    #[arg(long, default_value_t = 20)]
    frame_ms: u64,

    /// Largest compressed frame accepted, in bytes
    #[arg(long, default_value_t = 640)]
    max_frame_bytes: usize,

    /// Hand-off queue depth in frames (bounds buffered latency)
    #[arg(long, default_value_t = 10)]
    queue_depth: usize,

    /// List audio output devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_target(false).init();
    }

    if args.list_devices {
        let devices = playback::list_devices()?;
        for d in &devices {
            let marker = if d.is_default_output { "*" } else { " " };
            println!(
                "{} {}: {} (out={}, {} Hz)",
                marker, d.index, d.name, d.max_output_channels, d.default_sample_rate
            );
        }
        return Ok(());
    }

    let format = match args.channels {
        1 => Format::mono(args.sample_rate),
        2 => Format::stereo(args.sample_rate),
        n => bail!("unsupported channel count: {}", n),
    };

    let config = ServerConfig {
        addr: args.listen,
        player: PlayerConfig {
            format,
            frame_duration: Duration::from_millis(args.frame_ms),
            max_frame_bytes: args.max_frame_bytes,
            queue_depth: args.queue_depth,
            ..PlayerConfig::default()
        },
    };

    info!(
        "starting opuscastd: {} Hz, {} channel(s), {}ms frames",
        format.sample_rate,
        format.channels(),
        args.frame_ms
    );

    let server = Server::new(config);
    server.serve()?;
    Ok(())
}
