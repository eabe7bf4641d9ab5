//! PCM audio format handling.

mod format;

pub use format::Format;
