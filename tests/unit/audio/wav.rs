use super::*;

fn u16_at(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn u32_at(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(b[at..at + 4].try_into().unwrap())
}

#[test]
fn header_fields_for_mono_16bit() {
    let wav = encode_wav_mono16(44_100, &[0, 1, -1]).unwrap();
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32_at(&wav, 4), 36 + 6);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u32_at(&wav, 16), 16);
    assert_eq!(u16_at(&wav, 20), FORMAT_PCM);
    assert_eq!(u16_at(&wav, 22), 1);
    assert_eq!(u32_at(&wav, 24), 44_100);
    assert_eq!(u32_at(&wav, 28), 88_200);
    assert_eq!(u16_at(&wav, 32), 2);
    assert_eq!(u16_at(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32_at(&wav, 40), 6);
    assert_eq!(&wav[WAV_HEADER_LEN..], &[0, 0, 1, 0, 0xFF, 0xFF]);
}

#[test]
fn fixture_tone_data_length_is_two_bytes_per_sample() {
    let tone = ToneSpec::default();
    let wav = synthesize_wav(&tone).unwrap();
    assert_eq!(u32_at(&wav, 40) as usize, tone.sample_count() * 2);
    assert_eq!(wav.len(), WAV_HEADER_LEN + 88_200 * 2);
    assert_eq!(u32_at(&wav, 4) as usize, wav.len() - 8);
}

#[test]
fn synthesis_is_byte_identical_across_calls() {
    let tone = ToneSpec::default();
    assert_eq!(synthesize_wav(&tone).unwrap(), synthesize_wav(&tone).unwrap());
}

#[test]
fn zero_sample_rate_is_rejected() {
    assert!(encode_wav_mono16(0, &[]).is_err());
}

#[test]
fn empty_clip_is_header_only() {
    let wav = encode_wav_mono16(8_000, &[]).unwrap();
    assert_eq!(wav.len(), WAV_HEADER_LEN);
    assert_eq!(u32_at(&wav, 40), 0);
}
