use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::{
        core::Size,
        error::{PanelkitError, PanelkitResult},
        math::premultiply_rgba8_in_place,
    },
    render::surface::Surface,
};

/// Decoded source image, shared between every panel that shows it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAsset {
    pixels: Arc<Surface>,
}

impl ImageAsset {
    pub fn from_surface(surface: Surface) -> Self {
        Self {
            pixels: Arc::new(surface),
        }
    }

    /// Pixel size of the source image.
    pub fn natural_size(&self) -> Size {
        self.pixels.size()
    }

    /// Width / height of the source image.
    pub fn natural_aspect_ratio(&self) -> PanelkitResult<f64> {
        let size = self.natural_size();
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(PanelkitError::config(format!(
                "image has degenerate natural size {}x{}",
                size.width, size.height
            )));
        }
        Ok(size.width / size.height)
    }

    pub fn surface(&self) -> &Surface {
        &self.pixels
    }
}

/// Decode PNG/JPEG/... bytes into a premultiplied [`ImageAsset`].
pub fn decode_image(bytes: &[u8]) -> PanelkitResult<ImageAsset> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(ImageAsset::from_surface(Surface::from_premul_bytes(
        width,
        height,
        rgba8_premul,
    )?))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
