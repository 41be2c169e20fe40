use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::{Rgba8, Size},
    error::{PanelkitError, PanelkitResult},
};

/// Rendered node content: premultiplied RGBA8 pixels owned by exactly one node.
///
/// Surfaces are replaced wholesale on regeneration and never edited in place afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Surface filled with one straight-alpha color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, image::Rgba(color.to_premul())),
        }
    }

    /// Wrap tightly packed, row-major premultiplied RGBA8 bytes.
    pub fn from_premul_bytes(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PanelkitResult<Self> {
        let pixels = RgbaImage::from_raw(width, height, rgba8_premul).ok_or_else(|| {
            PanelkitError::render(format!(
                "premultiplied buffer does not match a {width}x{height} surface"
            ))
        })?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// A resampled copy at exactly `width` x `height`; the source is left untouched.
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 || self.is_empty() {
            return Self::empty(width, height);
        }
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        Self {
            pixels: image::imageops::resize(&self.pixels, width, height, FilterType::Triangle),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
