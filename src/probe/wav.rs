use crate::audio::wav::FORMAT_PCM;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::probe::{slice_at, u16_le, u32_le};

/// Level reported for silent or empty audio.
pub const SILENCE_DB: f64 = -100.0;

/// Peak and RMS level of the normalized samples, in dBFS.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VolumeStats {
    /// `20 * log10(max |s|)`.
    pub peak_db: f64,
    /// `20 * log10(sqrt(mean(s^2)))`.
    pub rms_db: f64,
}

/// Format fields of a RIFF/WAVE file.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WavInfo {
    /// `fmt ` format tag (1 = PCM).
    pub format_tag: u16,
    /// Interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Frames in the `data` chunk.
    pub sample_count: u64,
    /// `sample_count / sample_rate`.
    pub duration_secs: f64,
    /// Present when volume analysis was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeStats>,
}

struct Fmt {
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

fn to_db(level: f64) -> f64 {
    if level > 0.0 {
        20.0 * level.log10()
    } else {
        SILENCE_DB
    }
}

/// Peak and RMS over signed 16-bit samples, normalized by 32768.
pub fn volume_stats(samples: &[i16]) -> VolumeStats {
    if samples.is_empty() {
        return VolumeStats {
            peak_db: SILENCE_DB,
            rms_db: SILENCE_DB,
        };
    }
    let mut peak = 0.0f64;
    let mut sum_squares = 0.0f64;
    for &s in samples {
        let v = f64::from(s) / 32768.0;
        peak = peak.max(v.abs());
        sum_squares += v * v;
    }
    let rms = (sum_squares / samples.len() as f64).sqrt();
    VolumeStats {
        peak_db: to_db(peak),
        rms_db: to_db(rms),
    }
}

/// Parse the RIFF chunk list of `bytes`; with `analyze_volume`, also measure the level of
/// 16-bit PCM data.
pub fn probe_wav(bytes: &[u8], analyze_volume: bool) -> ForgeResult<WavInfo> {
    if slice_at(bytes, 0, 4, "RIFF tag")? != b"RIFF" {
        return Err(ForgeError::probe("missing RIFF tag"));
    }
    let riff_len = u32_le(bytes, 4, "RIFF length")? as usize;
    if slice_at(bytes, 8, 4, "WAVE tag")? != b"WAVE" {
        return Err(ForgeError::probe("RIFF form type is not WAVE"));
    }
    let end = riff_len
        .checked_add(8)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            ForgeError::probe(format!(
                "RIFF length {riff_len} exceeds file size {}",
                bytes.len()
            ))
        })?;

    let mut fmt: Option<Fmt> = None;
    let mut data: Option<&[u8]> = None;
    let mut at = 12usize;
    while at + 8 <= end {
        let id = slice_at(bytes, at, 4, "chunk id")?;
        let len = u32_le(bytes, at + 4, "chunk length")? as usize;
        let body = slice_at(&bytes[..end], at + 8, len, "chunk body")?;
        match id {
            b"fmt " => {
                if len < 16 {
                    return Err(ForgeError::probe(format!("fmt chunk length {len} < 16")));
                }
                fmt = Some(Fmt {
                    format_tag: u16_le(body, 0, "format tag")?,
                    channels: u16_le(body, 2, "channels")?,
                    sample_rate: u32_le(body, 4, "sample rate")?,
                    bits_per_sample: u16_le(body, 14, "bits per sample")?,
                });
            }
            b"data" => data = Some(body),
            _ => {}
        }
        // Odd-sized chunks are followed by a pad byte.
        at += 8 + len + (len & 1);
    }

    let fmt = fmt.ok_or_else(|| ForgeError::probe("missing fmt chunk"))?;
    let data = data.ok_or_else(|| ForgeError::probe("missing data chunk"))?;
    if fmt.channels == 0 || fmt.sample_rate == 0 {
        return Err(ForgeError::probe("fmt chunk declares zero channels or sample rate"));
    }
    if fmt.bits_per_sample == 0 || !fmt.bits_per_sample.is_multiple_of(8) {
        return Err(ForgeError::probe(format!(
            "unsupported bits per sample {}",
            fmt.bits_per_sample
        )));
    }

    let frame_len = usize::from(fmt.channels) * usize::from(fmt.bits_per_sample / 8);
    let sample_count = (data.len() / frame_len) as u64;

    let volume = if analyze_volume {
        if fmt.format_tag != FORMAT_PCM || fmt.bits_per_sample != 16 {
            return Err(ForgeError::probe("volume analysis needs 16-bit PCM data"));
        }
        let samples: Vec<i16> = data
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        Some(volume_stats(&samples))
    } else {
        None
    };

    Ok(WavInfo {
        format_tag: fmt.format_tag,
        channels: fmt.channels,
        sample_rate: fmt.sample_rate,
        bits_per_sample: fmt.bits_per_sample,
        sample_count,
        duration_secs: sample_count as f64 / f64::from(fmt.sample_rate),
        volume,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/probe/wav.rs"]
mod tests;
