//! Fixed minimal baseline JPEG.
//!
//! This is not an encoder. The quantization table is all ones, the Huffman tables are the
//! standard luminance tables, and the entropy-coded scan is a literal payload for one uniform
//! gray 8x8 block. The output is the same for every call.

use crate::foundation::error::{ForgeError, ForgeResult};

/// Start of image.
pub const SOI: u8 = 0xD8;
/// End of image.
pub const EOI: u8 = 0xD9;
/// JFIF application segment.
pub const APP0: u8 = 0xE0;
/// Define quantization table.
pub const DQT: u8 = 0xDB;
/// Start of frame, baseline DCT.
pub const SOF0: u8 = 0xC0;
/// Define Huffman table.
pub const DHT: u8 = 0xC4;
/// Start of scan.
pub const SOS: u8 = 0xDA;

/// Width and height of the single block.
pub const JPEG_BLOCK_SIZE: u16 = 8;

const JFIF_APP0: [u8; 14] = *b"JFIF\x00\x01\x01\x00\x00\x01\x00\x01\x00\x00";

const DC_BITS: [u8; 16] = [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];
const DC_VALS: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

const AC_BITS: [u8; 16] = [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 125];
const AC_VALS: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61,
    0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xa1, 0x08, 0x23, 0x42, 0xb1, 0xc1, 0x15, 0x52,
    0xd1, 0xf0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0a, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x25,
    0x26, 0x27, 0x28, 0x29, 0x2a, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44, 0x45,
    0x46, 0x47, 0x48, 0x49, 0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64,
    0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x83,
    0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99,
    0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6,
    0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3,
    0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda, 0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8,
    0xe9, 0xea, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa,
];

/// Entropy-coded data for the uniform gray block.
pub const GRAY_BLOCK_SCAN: [u8; 6] = [0xfb, 0xd3, 0x28, 0xa2, 0x80, 0x00];

/// Assemble the fixture JPEG: SOI, APP0, DQT, SOF0, DHT (DC), DHT (AC), SOS, scan, EOI.
pub fn encode_minimal_jpeg() -> ForgeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(320);
    write_marker(&mut out, SOI);
    write_segment(&mut out, APP0, &JFIF_APP0)?;
    write_segment(&mut out, DQT, &dqt_payload())?;
    write_segment(&mut out, SOF0, &sof0_payload(JPEG_BLOCK_SIZE, JPEG_BLOCK_SIZE))?;
    write_segment(&mut out, DHT, &dht_payload(0x00, &DC_BITS, &DC_VALS)?)?;
    write_segment(&mut out, DHT, &dht_payload(0x10, &AC_BITS, &AC_VALS)?)?;
    write_segment(&mut out, SOS, &sos_payload())?;
    out.extend_from_slice(&GRAY_BLOCK_SCAN);
    write_marker(&mut out, EOI);
    Ok(out)
}

fn write_marker(out: &mut Vec<u8>, marker: u8) {
    out.extend_from_slice(&[0xFF, marker]);
}

/// Marker, big-endian length counting itself (payload + 2), payload.
pub(crate) fn write_segment(out: &mut Vec<u8>, marker: u8, payload: &[u8]) -> ForgeResult<()> {
    let len = u16::try_from(payload.len() + 2).map_err(|_| {
        ForgeError::validation(format!(
            "jpeg segment 0x{marker:02X} payload of {} bytes exceeds the 16-bit length field",
            payload.len()
        ))
    })?;
    write_marker(out, marker);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(())
}

fn dqt_payload() -> [u8; 65] {
    // table 0, 8-bit precision, all ones
    let mut p = [1u8; 65];
    p[0] = 0;
    p
}

fn sof0_payload(width: u16, height: u16) -> [u8; 9] {
    let h = height.to_be_bytes();
    let w = width.to_be_bytes();
    // 8-bit precision, one component: id 1, 1x1 sampling, quant table 0
    [8, h[0], h[1], w[0], w[1], 1, 1, 0x11, 0]
}

fn dht_payload(class_and_id: u8, bits: &[u8; 16], vals: &[u8]) -> ForgeResult<Vec<u8>> {
    let declared: usize = bits.iter().map(|&b| usize::from(b)).sum();
    if declared != vals.len() {
        return Err(ForgeError::validation(format!(
            "huffman table 0x{class_and_id:02X} declares {declared} codes but has {} values",
            vals.len()
        )));
    }
    let mut p = Vec::with_capacity(1 + bits.len() + vals.len());
    p.push(class_and_id);
    p.extend_from_slice(bits);
    p.extend_from_slice(vals);
    Ok(p)
}

fn sos_payload() -> [u8; 6] {
    // one component (id 1, DC/AC table 0), spectral selection 0..63, no approximation
    [1, 1, 0x00, 0x00, 0x3f, 0x00]
}

#[cfg(test)]
#[path = "../../tests/unit/raster/jpeg.rs"]
mod tests;
