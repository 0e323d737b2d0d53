use std::io::Write as _;

use flate2::{Compression, write::ZlibEncoder};

use crate::foundation::align::len_u32;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::raster::grid::PixelGrid;

/// Fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const BIT_DEPTH_8: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode `grid` as an 8-bit RGBA PNG: signature, IHDR, one IDAT, IEND.
///
/// The scanlines use filter type None and are compressed in a single zlib stream at the
/// highest compression level.
pub fn encode_png(grid: &PixelGrid) -> ForgeResult<Vec<u8>> {
    let compressed = deflate_best(&grid.scanlines())?;

    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + compressed.len() + 3 * 12 + 13);
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr_payload(grid.width(), grid.height()))?;
    write_chunk(&mut out, b"IDAT", &compressed)?;
    write_chunk(&mut out, b"IEND", &[])?;
    Ok(out)
}

/// Build the grid from `rule` and encode it in one step.
pub fn encode_png_with(
    width: u32,
    height: u32,
    rule: impl Fn(u32, u32) -> [u8; 4],
) -> ForgeResult<Vec<u8>> {
    let grid = PixelGrid::from_fn(width, height, rule)?;
    encode_png(&grid)
}

/// CRC-32 of a chunk, computed over the type tag followed by the payload.
pub fn chunk_crc(tag: &[u8; 4], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(payload);
    hasher.finalize()
}

pub(crate) fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) -> ForgeResult<()> {
    let len = len_u32(payload.len(), "png chunk")?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&chunk_crc(tag, payload).to_be_bytes());
    Ok(())
}

fn ihdr_payload(width: u32, height: u32) -> [u8; 13] {
    let mut p = [0u8; 13];
    p[0..4].copy_from_slice(&width.to_be_bytes());
    p[4..8].copy_from_slice(&height.to_be_bytes());
    p[8] = BIT_DEPTH_8;
    p[9] = COLOR_TYPE_RGBA;
    // compression, filter and interlace methods stay 0
    p
}

fn deflate_best(raw: &[u8]) -> ForgeResult<Vec<u8>> {
    let mut enc = ZlibEncoder::new(Vec::with_capacity(raw.len() / 2), Compression::best());
    enc.write_all(raw)
        .map_err(|e| ForgeError::encode(format!("deflate png scanlines: {e}")))?;
    enc.finish()
        .map_err(|e| ForgeError::encode(format!("finish png zlib stream: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/png.rs"]
mod tests;
