use crate::audio::tone::ToneSpec;
use crate::foundation::align::len_u32;
use crate::foundation::error::{ForgeError, ForgeResult};

/// `WAVE_FORMAT_PCM`.
pub const FORMAT_PCM: u16 = 1;
/// Size of the RIFF header plus `fmt ` chunk plus `data` chunk header, minus the first 8 bytes.
pub const RIFF_OVERHEAD: u32 = 36;
/// Size of the whole header before sample data.
pub const WAV_HEADER_LEN: usize = 44;

const FMT_CHUNK_LEN: u32 = 16;
const BITS_PER_SAMPLE: u16 = 16;
const CHANNELS_MONO: u16 = 1;

/// Wrap mono signed 16-bit samples in a RIFF/WAVE container.
pub fn encode_wav_mono16(sample_rate: u32, samples: &[i16]) -> ForgeResult<Vec<u8>> {
    if sample_rate == 0 {
        return Err(ForgeError::validation("wav sample_rate must be non-zero"));
    }
    let block_align = CHANNELS_MONO * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| ForgeError::validation("wav byte rate overflows u32"))?;

    let data_len = len_u32(samples.len() * usize::from(block_align), "wav data")?;
    let riff_len = data_len
        .checked_add(RIFF_OVERHEAD)
        .ok_or_else(|| ForgeError::validation("wav file size overflows u32"))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&CHANNELS_MONO.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    Ok(out)
}

/// Synthesize `tone` and encode it as a mono 16-bit WAV file.
#[tracing::instrument]
pub fn synthesize_wav(tone: &ToneSpec) -> ForgeResult<Vec<u8>> {
    let samples = tone.synthesize()?;
    encode_wav_mono16(tone.sample_rate, &samples)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/wav.rs"]
mod tests;
