use std::error::Error;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};
use log::{error, info};

const VOLUME: f32 = 0.2;

/// Continuous sine tone on the default output device, audible only while
/// switched on.
pub struct Beeper {
    tone: Arc<AtomicBool>,
    _stream: Option<cpal::Stream>,
}

impl Beeper {
    pub fn new(frequency: f32) -> Result<Self, Box<dyn Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no audio output device available")?;
        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();

        let tone = Arc::new(AtomicBool::new(false));
        let stream = match sample_format {
            SampleFormat::I8 => build_stream::<i8>(&device, &config, frequency, tone.clone())?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, frequency, tone.clone())?,
            SampleFormat::I32 => build_stream::<i32>(&device, &config, frequency, tone.clone())?,
            SampleFormat::U8 => build_stream::<u8>(&device, &config, frequency, tone.clone())?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, frequency, tone.clone())?,
            SampleFormat::U32 => build_stream::<u32>(&device, &config, frequency, tone.clone())?,
            SampleFormat::F32 => build_stream::<f32>(&device, &config, frequency, tone.clone())?,
            SampleFormat::F64 => build_stream::<f64>(&device, &config, frequency, tone.clone())?,
            sample_format => {
                return Err(format!("unsupported sample format '{}'", sample_format).into())
            }
        };
        stream.play()?;
        info!(
            "Audio on {} at {} Hz, {:?}",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            config.sample_rate.0,
            sample_format
        );

        Ok(Self {
            tone,
            _stream: Some(stream),
        })
    }

    /// A beeper that never makes a sound.
    pub fn silent() -> Self {
        Self {
            tone: Arc::new(AtomicBool::new(false)),
            _stream: None,
        }
    }

    pub fn set_active(&self, active: bool) {
        self.tone.store(active, Ordering::Relaxed);
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    frequency: f32,
    tone: Arc<AtomicBool>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = config.sample_rate.0 as f32;
    let channels = config.channels as usize;

    let mut sample_clock = 0f32;
    let mut next_value = move || {
        sample_clock = (sample_clock + 1.0) % sample_rate;
        (sample_clock * frequency * 2.0 * PI / sample_rate).sin() * VOLUME
    };

    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let active = tone.load(Ordering::Relaxed);
            for frame in data.chunks_mut(channels) {
                let value = if active { next_value() } else { 0.0 };
                let sample = T::from_sample(value);
                for out in frame.iter_mut() {
                    *out = sample;
                }
            }
        },
        |err| error!("Audio stream error: {}", err),
        None,
    )
}
