//! Fixed fixture set: file names, generation order and the driver that writes them.

use std::path::{Path, PathBuf};

use crate::audio::wav::synthesize_wav;
use crate::encode::mp3::{Mp3Outcome, transcode_to_mp3};
use crate::foundation::error::ForgeResult;
use crate::foundation::fs::{ensure_dir, write_fixture};
use crate::raster::grid::{fixture_gradient, texture_gradient};
use crate::raster::jpeg::encode_minimal_jpeg;
use crate::raster::png::encode_png_with;
use crate::scene::glb::{TriangleMesh, assemble_textured_glb};

/// Fixture set configuration.
pub mod opts;

pub use opts::{FixtureOpts, ImageOpts};

/// One of the five fixture files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    /// `test.png`
    Png,
    /// `test.jpg`
    Jpeg,
    /// `test.wav`
    Wav,
    /// `test.mp3`
    Mp3,
    /// `test.glb`
    Glb,
}

impl FixtureKind {
    /// Generation order.
    pub const ALL: [FixtureKind; 5] = [
        FixtureKind::Png,
        FixtureKind::Jpeg,
        FixtureKind::Wav,
        FixtureKind::Mp3,
        FixtureKind::Glb,
    ];

    /// Fixed output file name.
    pub fn file_name(self) -> &'static str {
        match self {
            FixtureKind::Png => "test.png",
            FixtureKind::Jpeg => "test.jpg",
            FixtureKind::Wav => "test.wav",
            FixtureKind::Mp3 => "test.mp3",
            FixtureKind::Glb => "test.glb",
        }
    }
}

/// What a generation run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct GenerationReport {
    /// Files written, in the order they were written.
    pub written: Vec<PathBuf>,
    /// Outcome of the MP3 step, when it was requested.
    pub mp3: Option<Mp3Outcome>,
}

/// Encode one of the in-process fixtures. Returns `None` for [`FixtureKind::Mp3`], which is
/// produced by an external tool.
pub fn encode_fixture(kind: FixtureKind, opts: &FixtureOpts) -> ForgeResult<Option<Vec<u8>>> {
    let bytes = match kind {
        FixtureKind::Png => {
            let ImageOpts { width, height } = opts.image;
            encode_png_with(width, height, fixture_gradient(width, height))?
        }
        FixtureKind::Jpeg => encode_minimal_jpeg()?,
        FixtureKind::Wav => synthesize_wav(&opts.tone)?,
        FixtureKind::Mp3 => return Ok(None),
        FixtureKind::Glb => {
            let ImageOpts { width, height } = opts.texture;
            let texture = encode_png_with(width, height, texture_gradient(width, height))?;
            assemble_textured_glb(&TriangleMesh::fixture_triangle(), &texture)?
        }
    };
    Ok(Some(bytes))
}

/// Write all five fixtures into `out_dir`.
pub fn generate_all(out_dir: &Path, opts: &FixtureOpts) -> ForgeResult<GenerationReport> {
    generate(out_dir, opts, &FixtureKind::ALL)
}

/// Write the fixtures in `kinds` into `out_dir`, always in [`FixtureKind::ALL`] order.
///
/// The MP3 step reads `test.wav` from `out_dir` and writes it first when it is missing. A
/// missing or failing transcoder is reported in [`GenerationReport::mp3`], not as an error.
#[tracing::instrument(skip_all, fields(out_dir = %out_dir.display()))]
pub fn generate(
    out_dir: &Path,
    opts: &FixtureOpts,
    kinds: &[FixtureKind],
) -> ForgeResult<GenerationReport> {
    opts.validate()?;
    ensure_dir(out_dir)?;

    let mut report = GenerationReport::default();
    for kind in FixtureKind::ALL.into_iter().filter(|k| kinds.contains(k)) {
        let path = out_dir.join(kind.file_name());

        if kind == FixtureKind::Mp3 {
            let wav = out_dir.join(FixtureKind::Wav.file_name());
            if opts.mp3.enabled && !wav.exists() {
                tracing::info!(path = %wav.display(), "generating wav input for mp3");
                write_fixture(&wav, &synthesize_wav(&opts.tone)?)?;
                report.written.push(wav.clone());
            }

            let outcome = transcode_to_mp3(&wav, &path, &opts.mp3);
            let written = matches!(outcome, Mp3Outcome::Written { .. });
            report.mp3 = Some(outcome);
            if written {
                tracing::info!(path = %path.display(), "wrote fixture");
                report.written.push(path);
            }
            continue;
        }

        if let Some(bytes) = encode_fixture(kind, opts)? {
            write_fixture(&path, &bytes)?;
            report.written.push(path);
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/fixtures/driver.rs"]
mod tests;
