//! Output device setup
//!
//! Opens the default output device at the stimulus sample rate in 32-bit
//! float and wires a [`StreamRenderer`] into the cpal callback. The renderer
//! is only moved into the callback once the stream has been built.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{BufferSize, SampleFormat, SampleRate, SupportedBufferSize};
use tracing::{debug, error, info, warn};

use gamma40::{
    dsp::pulse::SAMPLE_RATE,
    io::{ScopeTap, StreamRenderer},
    PlaybackDriver,
};

/// What the device actually gave us.
#[derive(Debug, Clone)]
pub struct OutputInfo {
    pub device_name: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub buffer_size: BufferSize,
}

/// Open the default output and start rendering `driver` into it.
///
/// `buffer_frames` of `None` leaves the buffer size to the device. The
/// returned stream is built but not yet playing.
pub fn open_output(
    driver: PlaybackDriver,
    buffer_frames: Option<u32>,
    tap: Option<ScopeTap>,
) -> EyreResult<(cpal::Stream, OutputInfo)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let device_name = device.name().unwrap_or_else(|_| "<unknown>".to_string());
    debug!(host = ?host.id(), device = %device_name, "selected output device");

    let target = SampleRate(SAMPLE_RATE);
    let supported = device
        .supported_output_configs()
        .wrap_err("failed to query output configs")?
        .filter(|c| {
            c.sample_format() == SampleFormat::F32
                && c.min_sample_rate() <= target
                && target <= c.max_sample_rate()
        })
        .min_by_key(|c| c.channels())
        .ok_or_else(|| {
            eyre!("output device '{device_name}' has no 32-bit float config at {SAMPLE_RATE} Hz")
        })?
        .with_sample_rate(target);

    let buffer_size = match buffer_frames {
        None => BufferSize::Default,
        Some(frames) => match supported.buffer_size() {
            SupportedBufferSize::Range { min, max } => {
                let clamped = frames.clamp(*min, *max);
                if clamped != frames {
                    warn!(requested = frames, used = clamped, "buffer size out of device range");
                }
                BufferSize::Fixed(clamped)
            }
            SupportedBufferSize::Unknown => {
                warn!(requested = frames, "device does not report buffer sizes, using default");
                BufferSize::Default
            }
        },
    };

    let mut config: cpal::StreamConfig = supported.config();
    config.buffer_size = buffer_size.clone();
    let channels = config.channels;

    let mut renderer = StreamRenderer::new(driver, channels as usize);
    if let Some(tap) = tap {
        renderer = renderer.with_tap(tap);
    }

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| renderer.process(data),
            |err| error!(%err, "audio stream error"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    let info = OutputInfo {
        device_name,
        channels,
        sample_rate: config.sample_rate.0,
        buffer_size,
    };
    info!(
        device = %info.device_name,
        channels = info.channels,
        sample_rate = info.sample_rate,
        buffer = ?info.buffer_size,
        "audio device opened"
    );

    Ok((stream, info))
}
