//! assetforge writes a small, byte-exact set of test fixtures:
//!
//! - `test.png`: 64x64 RGBA gradient
//! - `test.jpg`: minimal 8x8 grayscale baseline JPEG
//! - `test.wav`: 2 s mono 16-bit 440 Hz tone with linear fades
//! - `test.mp3`: the WAV transcoded by `ffmpeg` or `lame`, skipped when neither is usable
//! - `test.glb`: one textured triangle with an embedded 16x16 PNG
//!
//! Every encoder is a pure function from parameters to bytes; [`generate_all`] writes the set
//! into a directory and [`probe_path`] reads fixtures back at the container level.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Audio synthesis and the WAV container.
pub mod audio;
/// External transcoders.
pub mod encode;
/// Fixture set definition and the generation driver.
pub mod fixtures;
/// Container-level read-back.
pub mod probe;
/// PNG and JPEG encoders.
pub mod raster;
/// glTF document model and GLB assembly.
pub mod scene;

pub use crate::foundation::error::{ForgeError, ForgeResult};

pub use crate::audio::tone::ToneSpec;
pub use crate::audio::wav::{encode_wav_mono16, synthesize_wav};
pub use crate::encode::mp3::{
    Mp3Opts, Mp3Outcome, TranscodeOutcome, TranscoderKind, TranscoderTool, transcode_to_mp3,
};
pub use crate::fixtures::{
    FixtureKind, FixtureOpts, GenerationReport, ImageOpts, encode_fixture, generate, generate_all,
};
pub use crate::probe::{ProbeDetails, ProbeReport, probe_bytes, probe_path};
pub use crate::raster::grid::PixelGrid;
pub use crate::raster::jpeg::encode_minimal_jpeg;
pub use crate::raster::png::{encode_png, encode_png_with};
pub use crate::scene::glb::{TriangleMesh, assemble_textured_glb};
