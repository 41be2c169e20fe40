use crate::foundation::error::{PanelkitError, PanelkitResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) RGBA8 color as authored in scenes.
///
/// Serialized as `[r, g, b, a]`; `[r, g, b]` is accepted on input and means opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "ColorRepr", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Premultiplied bytes in `[r, g, b, a]` order.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgba([u8; 4]),
    Rgb([u8; 3]),
}

impl From<ColorRepr> for Rgba8 {
    fn from(v: ColorRepr) -> Self {
        match v {
            ColorRepr::Rgba(c) => c.into(),
            ColorRepr::Rgb([r, g, b]) => Self::opaque(r, g, b),
        }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Screen (frame buffer) dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> PanelkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(PanelkitError::config("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// The rectangle handed to root nodes each frame.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Whole-pixel dimensions of a size that is already rounded.
pub fn pixel_dims(size: Size) -> PanelkitResult<(u32, u32)> {
    fn dim(v: f64, axis: &str) -> PanelkitResult<u32> {
        if !v.is_finite() || v < 0.0 || v > f64::from(u32::MAX) {
            return Err(PanelkitError::config(format!(
                "{axis} {v} is not a valid pixel dimension"
            )));
        }
        Ok(v.round() as u32)
    }

    Ok((dim(size.width, "width")?, dim(size.height, "height")?))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
