use super::*;

/// Walk marker segments between SOI and SOS, returning `(marker, declared_len)`.
fn header_segments(jpeg: &[u8]) -> (Vec<(u8, u16)>, usize) {
    let mut pos = 2;
    let mut segs = Vec::new();
    loop {
        assert_eq!(jpeg[pos], 0xFF, "expected marker at {pos}");
        let marker = jpeg[pos + 1];
        let len = u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]);
        segs.push((marker, len));
        pos += 2 + usize::from(len);
        if marker == SOS {
            return (segs, pos);
        }
    }
}

#[test]
fn starts_with_soi_and_ends_with_eoi() {
    let jpeg = encode_minimal_jpeg().unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
}

#[test]
fn segments_are_in_baseline_order_with_self_counting_lengths() {
    let jpeg = encode_minimal_jpeg().unwrap();
    let (segs, scan_start) = header_segments(&jpeg);
    let markers: Vec<u8> = segs.iter().map(|(m, _)| *m).collect();
    assert_eq!(markers, vec![APP0, DQT, SOF0, DHT, DHT, SOS]);

    let lens: Vec<u16> = segs.iter().map(|(_, l)| *l).collect();
    assert_eq!(lens, vec![16, 67, 11, 31, 181, 8]);

    assert_eq!(&jpeg[scan_start..jpeg.len() - 2], &GRAY_BLOCK_SCAN);
}

#[test]
fn frame_header_declares_one_8x8_component() {
    let jpeg = encode_minimal_jpeg().unwrap();
    let sof = jpeg
        .windows(2)
        .position(|w| w == [0xFF, SOF0])
        .unwrap();
    let p = &jpeg[sof + 4..sof + 4 + 9];
    assert_eq!(p[0], 8);
    assert_eq!(u16::from_be_bytes([p[1], p[2]]), 8);
    assert_eq!(u16::from_be_bytes([p[3], p[4]]), 8);
    assert_eq!(p[5], 1);
}

#[test]
fn write_segment_rejects_oversized_payload() {
    let mut out = Vec::new();
    let big = vec![0u8; usize::from(u16::MAX)];
    assert!(write_segment(&mut out, APP0, &big).is_err());
    assert!(out.is_empty());
}

#[test]
fn dht_rejects_mismatched_code_counts() {
    assert!(dht_payload(0x00, &DC_BITS, &DC_VALS[..11]).is_err());
}

#[test]
fn output_is_identical_across_calls() {
    assert_eq!(encode_minimal_jpeg().unwrap(), encode_minimal_jpeg().unwrap());
}
