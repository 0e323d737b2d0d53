use crate::audio::wav::RIFF_OVERHEAD;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Full-scale multiplier used to quantize `[-1, 1]` samples to signed 16-bit.
pub const PCM16_SCALE: f64 = 32767.0;

/// Parameters of the fixture sine tone.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToneSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Clip length in seconds.
    pub duration_secs: f64,
    /// Sine frequency in Hz.
    pub frequency_hz: f64,
    /// Peak amplitude in `[0, 1]`.
    pub amplitude: f64,
    /// Length of the linear fade-in and fade-out in seconds.
    pub fade_secs: f64,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            duration_secs: 2.0,
            frequency_hz: 440.0,
            amplitude: 0.5,
            fade_secs: 0.1,
        }
    }
}

impl ToneSpec {
    /// Check that every parameter is finite and in range.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.sample_rate == 0 {
            return Err(ForgeError::validation("tone sample_rate must be non-zero"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ForgeError::validation(
                "tone duration_secs must be finite and > 0",
            ));
        }
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(ForgeError::validation(
                "tone frequency_hz must be finite and >= 0",
            ));
        }
        // No clamping happens at quantization time, so the peak has to stay in range.
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(ForgeError::validation("tone amplitude must be in [0, 1]"));
        }
        if !self.fade_secs.is_finite() || self.fade_secs < 0.0 {
            return Err(ForgeError::validation(
                "tone fade_secs must be finite and >= 0",
            ));
        }
        // The WAV `data` and `RIFF` length fields are u32.
        let data_bytes = (f64::from(self.sample_rate) * self.duration_secs).round() * 2.0;
        if data_bytes + f64::from(RIFF_OVERHEAD) > f64::from(u32::MAX) {
            return Err(ForgeError::validation(format!(
                "tone of {} samples does not fit a 16-bit wav file",
                data_bytes / 2.0
            )));
        }
        Ok(())
    }

    /// Number of mono frames: `sample_rate * duration_secs`, rounded.
    pub fn sample_count(&self) -> usize {
        (f64::from(self.sample_rate) * self.duration_secs).round() as usize
    }

    /// Time in seconds of sample `i`.
    pub fn time_of(&self, i: usize) -> f64 {
        i as f64 / f64::from(self.sample_rate)
    }

    /// Linear fade-in over the first `fade_secs`, fade-out over the last, 1.0 in between.
    ///
    /// When the two fades overlap the fade-in wins.
    pub fn envelope(&self, t: f64) -> f64 {
        if t < self.fade_secs {
            t / self.fade_secs
        } else if t > self.duration_secs - self.fade_secs {
            (self.duration_secs - t) / self.fade_secs
        } else {
            1.0
        }
    }

    /// Quantized sample `i`, truncated toward zero.
    pub fn sample_at(&self, i: usize) -> i16 {
        let t = self.time_of(i);
        let phase = 2.0 * std::f64::consts::PI * self.frequency_hz * t;
        let v = self.amplitude * self.envelope(t) * phase.sin();
        (v * PCM16_SCALE) as i16
    }

    /// Every sample of the clip, in order.
    pub fn synthesize(&self) -> ForgeResult<Vec<i16>> {
        self.validate()?;
        Ok((0..self.sample_count()).map(|i| self.sample_at(i)).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/tone.rs"]
mod tests;
