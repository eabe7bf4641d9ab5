//! Audio playback via PortAudio.
//!
//! This module provides a blocking output stream on top of the PortAudio C
//! library:
//!
//! - Blocking I/O model: `stream.write()` blocks for roughly the playback
//!   duration of the samples handed to it
//! - Uses int16 (paInt16) interleaved sample format
//! - Links against the system portaudio library
//!
//! # Example
//!
//! ```ignore
//! use opuscast_audio::{pcm::Format, playback};
//!
//! // List devices
//! let devices = playback::list_devices()?;
//! for d in &devices {
//!     println!("{}: {} (out={})", d.index, d.name, d.max_output_channels);
//! }
//!
//! // Play 20ms of silence at 48kHz stereo
//! let mut stream = playback::OutputStream::open(Format::STEREO_48K, 960)?;
//! stream.start()?;
//! stream.write(&[0i16; 1920])?;
//! stream.close()?;
//! ```

pub(crate) mod ffi;

use std::ffi::CStr;
use std::io;
use std::ptr;
use std::sync::{Mutex, Once};

use crate::pcm::Format;

static INIT: Once = Once::new();
static INIT_RESULT: Mutex<Option<Result<(), String>>> = Mutex::new(None);

/// Initializes PortAudio. Safe to call multiple times.
fn initialize() -> io::Result<()> {
    INIT.call_once(|| {
        let err = unsafe { ffi::Pa_Initialize() };
        let result = if err == ffi::PA_NO_ERROR {
            Ok(())
        } else {
            Err(pa_error_string(err))
        };
        *INIT_RESULT.lock().unwrap() = Some(result);
    });

    match INIT_RESULT.lock().unwrap().as_ref().unwrap() {
        Ok(()) => Ok(()),
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.clone())),
    }
}

fn pa_error_string(code: ffi::PaError) -> String {
    unsafe {
        let ptr = ffi::Pa_GetErrorText(code);
        if ptr.is_null() {
            return format!("portaudio error {}", code);
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

fn pa_check(code: ffi::PaError) -> io::Result<()> {
    if code == ffi::PA_NO_ERROR {
        Ok(())
    } else {
        Err(io::Error::new(io::ErrorKind::Other, pa_error_string(code)))
    }
}

/// Information about an audio output device.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub max_output_channels: u32,
    pub default_low_output_latency: f64,
    pub default_high_output_latency: f64,
    pub default_sample_rate: f64,
    pub is_default_output: bool,
}

/// Lists available audio output devices.
pub fn list_devices() -> io::Result<Vec<DeviceInfo>> {
    initialize()?;

    let count = unsafe { ffi::Pa_GetDeviceCount() };
    if count < 0 {
        return Err(io::Error::new(io::ErrorKind::Other, pa_error_string(count)));
    }

    let default_output = unsafe { ffi::Pa_GetDefaultOutputDevice() };

    let mut devices = Vec::with_capacity(count as usize);
    for i in 0..count {
        let info = unsafe { ffi::Pa_GetDeviceInfo(i) };
        if info.is_null() {
            continue;
        }
        let info = unsafe { &*info };
        if info.max_output_channels <= 0 {
            continue;
        }
        let name = unsafe { CStr::from_ptr(info.name) }
            .to_string_lossy()
            .into_owned();

        devices.push(DeviceInfo {
            index: i as usize,
            name,
            max_output_channels: info.max_output_channels as u32,
            default_low_output_latency: info.default_low_output_latency,
            default_high_output_latency: info.default_high_output_latency,
            default_sample_rate: info.default_sample_rate,
            is_default_output: i == default_output,
        });
    }
    Ok(devices)
}

/// A blocking audio output stream.
///
/// `write()` pushes interleaved i16 samples into the device's buffer and
/// blocks while the device drains it, which paces the caller at the
/// device's real-time rate.
pub struct OutputStream {
    pa_stream: *mut std::os::raw::c_void,
    format: Format,
    closed: bool,
}

// OutputStream holds a raw stream pointer but is only ever driven by one
// thread at a time.
unsafe impl Send for OutputStream {}

impl OutputStream {
    /// Opens a blocking output stream on the default output device.
    ///
    /// `frames_per_buffer` is the device-side buffer granularity in sample
    /// frames (typically one codec frame, e.g. 960 for 20ms at 48kHz).
    pub fn open(format: Format, frames_per_buffer: usize) -> io::Result<OutputStream> {
        initialize()?;

        let device = unsafe { ffi::Pa_GetDefaultOutputDevice() };
        if device == ffi::PA_NO_DEVICE {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no default output device",
            ));
        }
        let info = unsafe { ffi::Pa_GetDeviceInfo(device) };
        if info.is_null() {
            return Err(io::Error::new(io::ErrorKind::Other, "failed to get output device info"));
        }

        let output_params = ffi::PaStreamParameters {
            device,
            channel_count: format.channels() as std::os::raw::c_int,
            sample_format: ffi::PA_INT16,
            suggested_latency: unsafe { (*info).default_low_output_latency },
            host_api_specific_stream_info: ptr::null_mut(),
        };

        let mut pa_stream: *mut std::os::raw::c_void = ptr::null_mut();
        pa_check(unsafe {
            ffi::Pa_OpenStream(
                &mut pa_stream,
                ptr::null(),
                &output_params,
                format.sample_rate as f64,
                frames_per_buffer as std::os::raw::c_ulong,
                ffi::PA_CLIP_OFF,
                ptr::null(),
                ptr::null_mut(),
            )
        })?;

        Ok(OutputStream {
            pa_stream,
            format,
            closed: false,
        })
    }

    /// Starts the stream.
    pub fn start(&mut self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::Other, "stream closed"));
        }
        pa_check(unsafe { ffi::Pa_StartStream(self.pa_stream) })
    }

    /// Stops the stream after the buffered audio finishes playing.
    pub fn stop(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        pa_check(unsafe { ffi::Pa_StopStream(self.pa_stream) })
    }

    /// Closes the stream and frees resources.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        unsafe {
            ffi::Pa_StopStream(self.pa_stream);
            pa_check(ffi::Pa_CloseStream(self.pa_stream))
        }
    }

    /// Writes interleaved i16 samples to the device, blocking while the
    /// device plays them out.
    ///
    /// `samples.len()` must be a whole number of sample frames.
    pub fn write(&self, samples: &[i16]) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::Other, "stream closed"));
        }
        if samples.is_empty() {
            return Ok(());
        }

        pa_check(unsafe {
            ffi::Pa_WriteStream(
                self.pa_stream,
                samples.as_ptr() as *const _,
                samples.len() as std::os::raw::c_ulong
                    / self.format.channels() as std::os::raw::c_ulong,
            )
        })
    }

    /// Returns the stream's PCM format.
    pub fn format(&self) -> Format {
        self.format
    }
}

impl Drop for OutputStream {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
