use super::*;
use crate::raster::jpeg::{APP0, DHT, DQT, encode_minimal_jpeg};

#[test]
fn fixture_jpeg_segments() {
    let info = probe_jpeg(&encode_minimal_jpeg().unwrap()).unwrap();
    assert_eq!((info.width, info.height, info.components), (8, 8, 1));

    let markers: Vec<u8> = info.segments.iter().map(|s| s.marker).collect();
    assert_eq!(markers, [APP0, DQT, SOF0, DHT, DHT, SOS]);
    let lengths: Vec<u16> = info.segments.iter().map(|s| s.length).collect();
    assert_eq!(lengths, [16, 67, 11, 31, 181, 8]);
    assert_eq!(info.scan_bytes, 6);
}

#[test]
fn missing_eoi_is_rejected() {
    let jpeg = encode_minimal_jpeg().unwrap();
    assert!(probe_jpeg(&jpeg[..jpeg.len() - 2]).is_err());
}

#[test]
fn overlong_segment_is_rejected() {
    let mut jpeg = encode_minimal_jpeg().unwrap();
    // APP0 length high byte.
    jpeg[4] = 0x7F;
    let err = probe_jpeg(&jpeg).unwrap_err();
    assert!(err.to_string().contains("segment payload"));
}

#[test]
fn stuffed_and_restart_bytes_stay_in_scan() {
    let jpeg = encode_minimal_jpeg().unwrap();
    let eoi_at = jpeg.len() - 2;
    let mut patched = jpeg[..eoi_at].to_vec();
    patched.extend_from_slice(&[0xFF, 0x00, 0xFF, 0xD0, 0x12]);
    patched.extend_from_slice(&jpeg[eoi_at..]);
    let info = probe_jpeg(&patched).unwrap();
    assert_eq!(info.scan_bytes, 6 + 5);
}

#[test]
fn stream_without_frame_header_is_rejected() {
    let err = probe_jpeg(&[0xFF, SOI, 0xFF, EOI]).unwrap_err();
    assert!(err.to_string().contains("SOF0"));
}
