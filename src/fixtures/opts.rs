use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::audio::tone::ToneSpec;
use crate::encode::mp3::Mp3Opts;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Largest accepted image side.
pub const MAX_IMAGE_EXTENT: u32 = 16_384;

/// Size of a generated gradient image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageOpts {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageOpts {
    fn validate(&self, what: &str) -> ForgeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ForgeError::validation(format!(
                "{what} size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_IMAGE_EXTENT || self.height > MAX_IMAGE_EXTENT {
            return Err(ForgeError::validation(format!(
                "{what} size {}x{} exceeds {MAX_IMAGE_EXTENT}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Every parameter of the fixture set. The default is the canonical fixture set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FixtureOpts {
    /// `test.png` size.
    pub image: ImageOpts,
    /// Size of the texture embedded in `test.glb`.
    pub texture: ImageOpts,
    /// `test.wav` tone.
    pub tone: ToneSpec,
    /// `test.mp3` transcoding.
    pub mp3: Mp3Opts,
}

impl Default for FixtureOpts {
    fn default() -> Self {
        Self {
            image: ImageOpts {
                width: 64,
                height: 64,
            },
            texture: ImageOpts {
                width: 16,
                height: 16,
            },
            tone: ToneSpec::default(),
            mp3: Mp3Opts::default(),
        }
    }
}

impl FixtureOpts {
    /// Read options from a JSON file; absent sections keep their defaults.
    pub fn from_path(path: &Path) -> ForgeResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open fixture options '{}'", path.display()))?;
        let opts = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ForgeError::serde(format!("parse fixture options '{}': {e}", path.display()))
        })?;
        Ok(opts)
    }

    /// Check every section.
    pub fn validate(&self) -> ForgeResult<()> {
        self.image.validate("image")?;
        self.texture.validate("texture")?;
        self.tone.validate()?;
        self.mp3.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fixtures/opts.rs"]
mod tests;
