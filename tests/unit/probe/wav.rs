use super::*;
use crate::audio::tone::ToneSpec;
use crate::audio::wav::{encode_wav_mono16, synthesize_wav};

#[test]
fn fixture_wav_format_fields() {
    let wav = synthesize_wav(&ToneSpec::default()).unwrap();
    let info = probe_wav(&wav, false).unwrap();
    assert_eq!(info.format_tag, 1);
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 44_100);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.sample_count, 88_200);
    assert!((info.duration_secs - 2.0).abs() < 1e-12);
    assert!(info.volume.is_none());
}

#[test]
fn fixture_wav_levels() {
    let wav = synthesize_wav(&ToneSpec::default()).unwrap();
    let vol = probe_wav(&wav, true).unwrap().volume.unwrap();
    // Half-scale sine: peak near -6 dBFS, RMS about 3 dB lower.
    assert!((vol.peak_db + 6.02).abs() < 0.05, "peak {}", vol.peak_db);
    assert!(vol.rms_db < vol.peak_db - 2.5, "rms {}", vol.rms_db);
    assert!(vol.rms_db > vol.peak_db - 4.0, "rms {}", vol.rms_db);
}

#[test]
fn silence_reports_floor_level() {
    let wav = encode_wav_mono16(8000, &[0; 16]).unwrap();
    let vol = probe_wav(&wav, true).unwrap().volume.unwrap();
    assert_eq!(vol.peak_db, SILENCE_DB);
    assert_eq!(vol.rms_db, SILENCE_DB);

    let empty = volume_stats(&[]);
    assert_eq!(empty.peak_db, SILENCE_DB);
}

#[test]
fn full_scale_square_is_zero_db() {
    let vol = volume_stats(&[i16::MIN, i16::MIN]);
    assert_eq!(vol.peak_db, 0.0);
    assert_eq!(vol.rms_db, 0.0);
}

#[test]
fn unknown_chunks_are_skipped() {
    let wav = encode_wav_mono16(8000, &[1, 2, 3]).unwrap();
    // Insert an odd-sized LIST chunk (plus pad byte) between fmt and data.
    let mut patched = wav[..36].to_vec();
    patched.extend_from_slice(b"LIST");
    patched.extend_from_slice(&3u32.to_le_bytes());
    patched.extend_from_slice(&[b'a', b'b', b'c', 0]);
    patched.extend_from_slice(&wav[36..]);
    let riff_len = (patched.len() - 8) as u32;
    patched[4..8].copy_from_slice(&riff_len.to_le_bytes());

    let info = probe_wav(&patched, false).unwrap();
    assert_eq!(info.sample_count, 3);
}

#[test]
fn truncated_data_is_rejected() {
    let wav = encode_wav_mono16(8000, &[1, 2, 3, 4]).unwrap();
    let err = probe_wav(&wav[..wav.len() - 2], false).unwrap_err();
    assert!(err.to_string().contains("RIFF length"));
}

#[test]
fn non_wave_form_is_rejected() {
    let mut wav = encode_wav_mono16(8000, &[0]).unwrap();
    wav[8..12].copy_from_slice(b"AVI ");
    assert!(probe_wav(&wav, false).is_err());
}
