use crate::foundation::error::{ForgeError, ForgeResult};

/// Row-major grid of straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid by evaluating `rule` at every `(x, y)` in row-major order.
    pub fn from_fn(
        width: u32,
        height: u32,
        rule: impl Fn(u32, u32) -> [u8; 4],
    ) -> ForgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ForgeError::validation(format!(
                "pixel grid must be non-empty, got {width}x{height}"
            )));
        }

        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&rule(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA8 bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Image stream as stored in PNG: each row prefixed with filter type 0 (None).
    pub(crate) fn scanlines(&self) -> Vec<u8> {
        let row_len = self.width as usize * 4;
        let mut out = Vec::with_capacity((row_len + 1) * self.height as usize);
        for row in self.rgba.chunks_exact(row_len) {
            out.push(0);
            out.extend_from_slice(row);
        }
        out
    }
}

fn ramp(v: u32, extent: u32) -> u8 {
    (255 * u64::from(v) / u64::from(extent)) as u8
}

/// Colour rule of the `test.png` fixture: red grows along x, green along y, blue falls along x.
pub fn fixture_gradient(width: u32, height: u32) -> impl Fn(u32, u32) -> [u8; 4] {
    move |x, y| {
        [
            ramp(x, width),
            ramp(y, height),
            ramp(width - x, width),
            255,
        ]
    }
}

/// Colour rule of the texture embedded in `test.glb`: same ramps, constant mid blue.
pub fn texture_gradient(width: u32, height: u32) -> impl Fn(u32, u32) -> [u8; 4] {
    move |x, y| [ramp(x, width), ramp(y, height), 128, 255]
}

#[cfg(test)]
#[path = "../../tests/unit/raster/grid.rs"]
mod tests;
