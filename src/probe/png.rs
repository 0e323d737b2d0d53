use anyhow::Context as _;

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::probe::{slice_at, u32_be};
use crate::raster::png::{PNG_SIGNATURE, chunk_crc};

/// One chunk as found in the stream.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PngChunk {
    /// Four-letter chunk type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload length.
    pub length: u32,
    /// Stored CRC matches the CRC of type and payload.
    pub crc_ok: bool,
}

/// Header fields and chunk list of a PNG file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PngInfo {
    /// Width from IHDR.
    pub width: u32,
    /// Height from IHDR.
    pub height: u32,
    /// Bits per channel.
    pub bit_depth: u8,
    /// PNG colour type (6 = RGBA).
    pub color_type: u8,
    /// Interlace method.
    pub interlace: u8,
    /// Chunks in file order, IEND included.
    pub chunks: Vec<PngChunk>,
}

/// Walk the chunk list of `bytes` and cross-check IHDR against a full decode.
pub fn probe_png(bytes: &[u8]) -> ForgeResult<PngInfo> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(ForgeError::probe("missing PNG signature"));
    }

    let mut chunks = Vec::new();
    let mut ihdr: Option<&[u8]> = None;
    let mut at = PNG_SIGNATURE.len();
    loop {
        let length = u32_be(bytes, at, "chunk length")?;
        let tag: [u8; 4] = slice_at(bytes, at + 4, 4, "chunk type")?
            .try_into()
            .map_err(|_| ForgeError::probe("chunk type"))?;
        let payload = slice_at(bytes, at + 8, length as usize, "chunk payload")?;
        let stored_crc = u32_be(bytes, at + 8 + length as usize, "chunk crc")?;

        let kind = String::from_utf8_lossy(&tag).into_owned();
        if chunks.is_empty() && &tag != b"IHDR" {
            return Err(ForgeError::probe(format!("first chunk is {kind}, expected IHDR")));
        }
        if &tag == b"IHDR" {
            ihdr = Some(payload);
        }
        chunks.push(PngChunk {
            kind,
            length,
            crc_ok: chunk_crc(&tag, payload) == stored_crc,
        });

        at += 12 + length as usize;
        if &tag == b"IEND" {
            break;
        }
    }
    if at != bytes.len() {
        return Err(ForgeError::probe(format!(
            "{} trailing bytes after IEND",
            bytes.len() - at
        )));
    }

    let ihdr = ihdr.ok_or_else(|| ForgeError::probe("missing IHDR"))?;
    if ihdr.len() != 13 {
        return Err(ForgeError::probe(format!("IHDR length {} != 13", ihdr.len())));
    }
    let width = u32_be(ihdr, 0, "IHDR width")?;
    let height = u32_be(ihdr, 4, "IHDR height")?;

    // The decoder rejects CRC mismatches itself; those are reported per chunk instead.
    if chunks.iter().all(|c| c.crc_ok) {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .context("decode png")?;
        if (decoded.width(), decoded.height()) != (width, height) {
            return Err(ForgeError::probe(format!(
                "IHDR says {width}x{height}, decoder produced {}x{}",
                decoded.width(),
                decoded.height()
            )));
        }
    }

    Ok(PngInfo {
        width,
        height,
        bit_depth: ihdr[8],
        color_type: ihdr[9],
        interlace: ihdr[12],
        chunks,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/probe/png.rs"]
mod tests;
