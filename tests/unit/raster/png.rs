use super::*;
use crate::raster::grid::fixture_gradient;

fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>, u32)> {
    let mut out = Vec::new();
    let mut pos = PNG_SIGNATURE.len();
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let payload = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        out.push((tag, payload, crc));
        pos += 12 + len;
    }
    out
}

#[test]
fn chunk_layout_is_ihdr_idat_iend() {
    let png = encode_png_with(64, 64, fixture_gradient(64, 64)).unwrap();
    assert_eq!(&png[..8], &PNG_SIGNATURE);

    let chunks = chunks(&png);
    let tags: Vec<&[u8; 4]> = chunks.iter().map(|(t, _, _)| t).collect();
    assert_eq!(tags, vec![b"IHDR", b"IDAT", b"IEND"]);

    let (_, ihdr, _) = &chunks[0];
    assert_eq!(ihdr.len(), 13);
    assert_eq!(&ihdr[0..4], &64u32.to_be_bytes());
    assert_eq!(&ihdr[4..8], &64u32.to_be_bytes());
    assert_eq!(&ihdr[8..], &[8, 6, 0, 0, 0]);

    assert!(chunks[2].1.is_empty());
}

#[test]
fn stored_crc_matches_recomputed_crc() {
    let png = encode_png_with(16, 16, |x, y| [x as u8, y as u8, 7, 255]).unwrap();
    for (tag, payload, crc) in chunks(&png) {
        assert_eq!(crc, chunk_crc(&tag, &payload));
    }
}

#[test]
fn iend_crc_is_the_well_known_constant() {
    assert_eq!(chunk_crc(b"IEND", &[]), 0xAE42_6082);
}

#[test]
fn idat_is_a_zlib_stream_of_the_scanlines() {
    use std::io::Read as _;

    let grid = PixelGrid::from_fn(5, 3, |x, y| [x as u8, y as u8, 1, 2]).unwrap();
    let png = encode_png(&grid).unwrap();
    let (_, idat, _) = chunks(&png).into_iter().nth(1).unwrap();

    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(idat.as_slice())
        .read_to_end(&mut raw)
        .unwrap();
    assert_eq!(raw, grid.scanlines());
}

#[test]
fn decodes_to_the_same_pixels() {
    let rule = fixture_gradient(64, 64);
    let png = encode_png_with(64, 64, &rule).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 64));
    for y in 0..64 {
        for x in 0..64 {
            assert_eq!(img.get_pixel(x, y).0, rule(x, y));
        }
    }
}

#[test]
fn encoding_is_deterministic() {
    let a = encode_png_with(16, 16, fixture_gradient(16, 16)).unwrap();
    let b = encode_png_with(16, 16, fixture_gradient(16, 16)).unwrap();
    assert_eq!(a, b);
}
