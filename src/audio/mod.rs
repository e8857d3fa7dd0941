//! Ambient sound: a low hum with a slow wind-like wobble.
//!
//! The graph is fixed: a 55 Hz sine through a 0.05 gain to the output, and a
//! 0.1 Hz sine through a gain of 10 into the hum's frequency. Once started it
//! runs until the audio context is dropped; scene changes never touch it.

#[cfg(feature = "audio")]
mod output;

use std::f32::consts::TAU;

use thiserror::Error;
use tracing::info;

#[cfg(feature = "audio")]
pub use output::RodioContext;

pub const HUM_HZ: f32 = 55.0;
pub const HUM_GAIN: f32 = 0.05;
pub const WOBBLE_HZ: f32 = 0.1;
/// Frequency swing of the hum, in Hz either side of `HUM_HZ`.
pub const WOBBLE_DEPTH_HZ: f32 = 10.0;
pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio backend compiled in")]
    Unavailable,

    #[error("audio device error: {0}")]
    Device(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f32,
    phase: f32,
}

impl Oscillator {
    pub fn sine(frequency: f32) -> Self {
        Oscillator {
            waveform: Waveform::Sine,
            frequency,
            phase: 0.0,
        }
    }

    /// Current output, then step forward one sample at `frequency_hz`.
    fn step(&mut self, frequency_hz: f32, sample_rate: f32) -> f32 {
        let out = match self.waveform {
            Waveform::Sine => self.phase.sin(),
        };
        self.phase += TAU * frequency_hz / sample_rate;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gain {
    pub gain: f32,
}

/// The ambient graph as a mono sample stream.
#[derive(Debug, Clone)]
pub struct AmbientDrone {
    pub hum: Oscillator,
    pub hum_gain: Gain,
    pub wobble: Oscillator,
    pub wobble_gain: Gain,
    sample_rate: u32,
}

impl AmbientDrone {
    pub fn new(sample_rate: u32) -> Self {
        AmbientDrone {
            hum: Oscillator::sine(HUM_HZ),
            hum_gain: Gain { gain: HUM_GAIN },
            wobble: Oscillator::sine(WOBBLE_HZ),
            wobble_gain: Gain {
                gain: WOBBLE_DEPTH_HZ,
            },
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Hum frequency for the next sample, after modulation.
    pub fn instantaneous_frequency(&self) -> f32 {
        let wobble = match self.wobble.waveform {
            Waveform::Sine => self.wobble.phase.sin(),
        };
        self.hum.frequency + wobble * self.wobble_gain.gain
    }
}

impl Iterator for AmbientDrone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let rate = self.sample_rate as f32;
        let wobble = self.wobble.step(self.wobble.frequency, rate);
        let frequency = self.hum.frequency + wobble * self.wobble_gain.gain;
        let hum = self.hum.step(frequency, rate);
        Some(hum * self.hum_gain.gain)
    }
}

/// A gesture-gated place to send audio. Implemented by the device backend
/// and by test doubles.
pub trait AudioContext {
    fn sample_rate(&self) -> u32;

    /// Start playing `source` indefinitely.
    fn play(&mut self, source: AmbientDrone) -> Result<(), AudioError>;
}

/// Proof that the ambient graph was started on a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientHandle {
    pub sample_rate: u32,
}

/// Build the ambient graph on `context` and start it.
pub fn start_ambient(context: &mut dyn AudioContext) -> Result<AmbientHandle, AudioError> {
    let sample_rate = context.sample_rate();
    context.play(AmbientDrone::new(sample_rate))?;
    info!(
        hum_hz = HUM_HZ,
        wobble_hz = WOBBLE_HZ,
        sample_rate,
        "ambient sound started"
    );
    Ok(AmbientHandle { sample_rate })
}

/// Open the default output device.
pub fn open_default_context() -> Result<Box<dyn AudioContext>, AudioError> {
    #[cfg(feature = "audio")]
    {
        Ok(Box::new(RodioContext::try_default()?))
    }
    #[cfg(not(feature = "audio"))]
    {
        Err(AudioError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillator_wraps_phase() {
        let mut osc = Oscillator::sine(11_025.0);
        for _ in 0..100 {
            osc.step(11_025.0, 44_100.0);
            assert!((0.0..TAU).contains(&osc.phase));
        }
    }

    #[test]
    fn first_sample_is_silent() {
        let mut drone = AmbientDrone::new(SAMPLE_RATE);
        assert_eq!(drone.next(), Some(0.0));
    }

    #[test]
    fn modulation_starts_at_centre_frequency() {
        let drone = AmbientDrone::new(SAMPLE_RATE);
        assert_eq!(drone.instantaneous_frequency(), HUM_HZ);
    }
}
