use crate::foundation::error::{ForgeError, ForgeResult};
use crate::probe::{slice_at, u16_be};
use crate::raster::jpeg::{EOI, SOF0, SOI, SOS};

/// One marker segment; `length` counts the two length bytes, as stored.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct JpegSegment {
    /// Marker code following `0xFF`.
    pub marker: u8,
    /// Declared segment length.
    pub length: u16,
}

/// Frame header and segment list of a baseline JPEG.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct JpegInfo {
    /// Width from SOF0.
    pub width: u16,
    /// Height from SOF0.
    pub height: u16,
    /// Colour components in the frame.
    pub components: u8,
    /// Segments in file order, SOI and EOI excluded.
    pub segments: Vec<JpegSegment>,
    /// Entropy-coded bytes following the SOS header.
    pub scan_bytes: usize,
}

fn is_standalone(marker: u8) -> bool {
    matches!(marker, 0x01 | 0xD0..=0xD7)
}

/// Length of the entropy-coded data starting at `at`: up to the first marker that is neither
/// a stuffed `0xFF 0x00` nor a restart marker.
fn scan_len(bytes: &[u8], at: usize) -> ForgeResult<usize> {
    let mut i = at;
    while i < bytes.len() {
        if bytes[i] == 0xFF {
            match bytes.get(i + 1) {
                Some(0x00) => i += 2,
                Some(&m) if (0xD0..=0xD7).contains(&m) => i += 2,
                Some(_) => return Ok(i - at),
                None => break,
            }
        } else {
            i += 1;
        }
    }
    Err(ForgeError::probe("scan data runs past end of stream"))
}

/// Walk the marker segments of `bytes` and read the SOF0 frame header.
pub fn probe_jpeg(bytes: &[u8]) -> ForgeResult<JpegInfo> {
    if !bytes.starts_with(&[0xFF, SOI]) {
        return Err(ForgeError::probe("missing SOI marker"));
    }

    let mut segments = Vec::new();
    let mut frame: Option<(u16, u16, u8)> = None;
    let mut scan_bytes = 0usize;
    let mut at = 2usize;
    loop {
        let head = slice_at(bytes, at, 2, "marker")?;
        if head[0] != 0xFF {
            return Err(ForgeError::probe(format!(
                "expected marker at offset {at}, found 0x{:02x}",
                head[0]
            )));
        }
        let marker = head[1];
        at += 2;
        if marker == 0xFF {
            // Fill byte before a marker.
            at -= 1;
            continue;
        }
        if marker == EOI {
            break;
        }
        if is_standalone(marker) {
            continue;
        }

        let length = u16_be(bytes, at, "segment length")?;
        if length < 2 {
            return Err(ForgeError::probe(format!(
                "segment 0x{marker:02x} declares length {length}"
            )));
        }
        let payload = slice_at(bytes, at + 2, usize::from(length) - 2, "segment payload")?;
        segments.push(JpegSegment { marker, length });

        if marker == SOF0 {
            if payload.len() < 6 {
                return Err(ForgeError::probe("SOF0 segment too short"));
            }
            let height = u16::from_be_bytes([payload[1], payload[2]]);
            let width = u16::from_be_bytes([payload[3], payload[4]]);
            frame = Some((width, height, payload[5]));
        }

        at += usize::from(length);
        if marker == SOS {
            let n = scan_len(bytes, at)?;
            scan_bytes += n;
            at += n;
        }
    }
    if at != bytes.len() {
        return Err(ForgeError::probe(format!(
            "{} trailing bytes after EOI",
            bytes.len() - at
        )));
    }

    let (width, height, components) =
        frame.ok_or_else(|| ForgeError::probe("no baseline SOF0 frame header"))?;
    Ok(JpegInfo {
        width,
        height,
        components,
        segments,
        scan_bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/probe/jpeg.rs"]
mod tests;
