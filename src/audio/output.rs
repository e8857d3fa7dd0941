//! Device output through rodio.

use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use super::{AmbientDrone, AudioContext, AudioError, SAMPLE_RATE};

impl Source for AmbientDrone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        AmbientDrone::sample_rate(self)
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// The default output device. Dropping it stops all sound.
pub struct RodioContext {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sinks: Vec<Sink>,
}

impl RodioContext {
    pub fn try_default() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
        Ok(RodioContext {
            _stream: stream,
            handle,
            sinks: Vec::new(),
        })
    }
}

impl AudioContext for RodioContext {
    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn play(&mut self, source: AmbientDrone) -> Result<(), AudioError> {
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;
        sink.append(source);
        self.sinks.push(sink);
        Ok(())
    }
}
