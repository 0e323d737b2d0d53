//! Structural read-back of the fixture formats.
//!
//! Probing checks container framing and header fields; it does not decode audio or scan data.

use std::path::{Path, PathBuf};

use sha2::Digest as _;

use crate::foundation::error::{ForgeError, ForgeResult};

/// GLB framing and scene summary.
pub mod glb;
/// JPEG marker segments.
pub mod jpeg;
/// PNG chunk list.
pub mod png;
/// RIFF/WAVE format fields and levels.
pub mod wav;

pub use glb::{Aabb, GlbInfo, probe_glb};
pub use jpeg::{JpegInfo, JpegSegment, probe_jpeg};
pub use png::{PngChunk, PngInfo, probe_png};
pub use wav::{VolumeStats, WavInfo, probe_wav};

/// Format-specific part of a [`ProbeReport`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ProbeDetails {
    /// PNG image.
    Png(PngInfo),
    /// Baseline JPEG image.
    Jpeg(JpegInfo),
    /// RIFF/WAVE audio.
    Wav(WavInfo),
    /// Binary glTF container.
    Glb(GlbInfo),
    /// MP3 stream, recognised by its ID3 tag or frame sync only.
    Mp3,
}

/// Result of probing one file.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProbeReport {
    /// File that was read.
    pub path: PathBuf,
    /// File size.
    pub size_bytes: u64,
    /// Lowercase hex SHA-256 of the file contents.
    pub sha256: String,
    /// Format-specific findings.
    pub details: ProbeDetails,
}

/// Read `path`, identify its format from the leading bytes and probe it.
pub fn probe_path(path: &Path, analyze_volume: bool) -> ForgeResult<ProbeReport> {
    let bytes = crate::foundation::fs::read_file(path)?;
    let details = probe_bytes(&bytes, analyze_volume).map_err(|e| match e {
        ForgeError::Probe(msg) => ForgeError::probe(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    Ok(ProbeReport {
        path: path.to_path_buf(),
        size_bytes: bytes.len() as u64,
        sha256: sha256_hex(&bytes),
        details,
    })
}

/// Identify the format of `bytes` and probe it.
pub fn probe_bytes(bytes: &[u8], analyze_volume: bool) -> ForgeResult<ProbeDetails> {
    if bytes.starts_with(&crate::raster::png::PNG_SIGNATURE) {
        return probe_png(bytes).map(ProbeDetails::Png);
    }
    if bytes.starts_with(&[0xFF, crate::raster::jpeg::SOI]) {
        return probe_jpeg(bytes).map(ProbeDetails::Jpeg);
    }
    if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WAVE".as_slice()) {
        return probe_wav(bytes, analyze_volume).map(ProbeDetails::Wav);
    }
    if bytes.starts_with(b"glTF") {
        return probe_glb(bytes).map(ProbeDetails::Glb);
    }
    if bytes.starts_with(b"ID3") || matches!(bytes, [0xFF, b, ..] if b & 0xE0 == 0xE0) {
        return Ok(ProbeDetails::Mp3);
    }
    Err(ForgeError::probe("unrecognized file format"))
}

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Bounds-checked view of `len` bytes at `at`.
pub(crate) fn slice_at<'a>(
    bytes: &'a [u8],
    at: usize,
    len: usize,
    what: &str,
) -> ForgeResult<&'a [u8]> {
    at.checked_add(len)
        .and_then(|end| bytes.get(at..end))
        .ok_or_else(|| {
            ForgeError::probe(format!(
                "{what} at offset {at} needs {len} bytes, stream has {}",
                bytes.len()
            ))
        })
}

pub(crate) fn u16_be(bytes: &[u8], at: usize, what: &str) -> ForgeResult<u16> {
    let b = slice_at(bytes, at, 2, what)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn u32_be(bytes: &[u8], at: usize, what: &str) -> ForgeResult<u32> {
    let b = slice_at(bytes, at, 4, what)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

pub(crate) fn u16_le(bytes: &[u8], at: usize, what: &str) -> ForgeResult<u16> {
    let b = slice_at(bytes, at, 2, what)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

pub(crate) fn u32_le(bytes: &[u8], at: usize, what: &str) -> ForgeResult<u32> {
    let b = slice_at(bytes, at, 4, what)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[cfg(test)]
#[path = "../tests/unit/probe.rs"]
mod tests;
