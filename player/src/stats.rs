//! Session counters.
//!
//! Counters are plain atomics bumped by the two stages off their blocking
//! paths; they are read once at teardown for the session summary line.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one session, shared between the receiver and the worker.
#[derive(Debug, Default)]
pub struct SessionStats {
    frames_received: AtomicU64,
    bytes_received: AtomicU64,
    frames_decoded: AtomicU64,
    frames_dropped: AtomicU64,
    samples_played: AtomicU64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self, bytes: usize) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_decoded(&self) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_played(&self, samples: usize) {
        self.samples_played.fetch_add(samples as u64, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSummary {
        StatsSummary {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            samples_played: self.samples_played.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub frames_received: u64,
    pub bytes_received: u64,
    pub frames_decoded: u64,
    pub frames_dropped: u64,
    pub samples_played: u64,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames received ({} bytes), {} decoded, {} dropped, {} samples played",
            self.frames_received,
            self.bytes_received,
            self.frames_decoded,
            self.frames_dropped,
            self.samples_played
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = SessionStats::new();
        stats.record_received(640);
        stats.record_received(320);
        stats.record_decoded();
        stats.record_dropped();
        stats.record_played(1920);

        let summary = stats.snapshot();
        assert_eq!(summary.frames_received, 2);
        assert_eq!(summary.bytes_received, 960);
        assert_eq!(summary.frames_decoded, 1);
        assert_eq!(summary.frames_dropped, 1);
        assert_eq!(summary.samples_played, 1920);
    }

    #[test]
    fn test_summary_display() {
        let stats = SessionStats::new();
        stats.record_received(10);
        let line = format!("{}", stats.snapshot());
        assert!(line.contains("1 frames received"));
    }
}
