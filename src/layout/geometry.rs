use crate::foundation::{
    core::{Point, Rect, Size},
    error::{PanelkitError, PanelkitResult},
};

/// Desired placement of a node expressed as fractions of its parent rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedLayout {
    /// Top-left corner as `[x, y]` fractions of the parent size, offset from the parent origin.
    pub pos: [f64; 2],
    /// Extent as `[width, height]` fractions of the parent size.
    pub size: [f64; 2],
    /// Keep the width/height ratio captured on the first layout pass.
    #[serde(default)]
    pub fix_aspect_ratio: bool,
}

impl Default for NormalizedLayout {
    fn default() -> Self {
        Self {
            pos: [0.0, 0.0],
            size: [1.0, 1.0],
            fix_aspect_ratio: false,
        }
    }
}

impl NormalizedLayout {
    pub fn new(pos: [f64; 2], size: [f64; 2], fix_aspect_ratio: bool) -> Self {
        Self {
            pos,
            size,
            fix_aspect_ratio,
        }
    }

    /// Fill the whole parent rectangle.
    pub fn fill() -> Self {
        Self::default()
    }

    /// Every fraction must be finite and within `[0, 1]`.
    pub fn validate(&self) -> PanelkitResult<()> {
        for (name, value) in [
            ("pos.x", self.pos[0]),
            ("pos.y", self.pos[1]),
            ("size.w", self.size[0]),
            ("size.h", self.size[1]),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PanelkitError::config(format!(
                    "layout {name} must be a finite fraction in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Shrink `content` uniformly until it fits inside `bound`.
///
/// Content that already fits is returned unchanged; this never grows. Rounding to whole pixels
/// happens once, on the final size.
pub fn scale_to_fit(content: Size, bound: Size) -> PanelkitResult<Size> {
    if !content.is_finite() || content.width <= 0.0 || content.height <= 0.0 {
        return Err(PanelkitError::config(format!(
            "scale_to_fit content size must be positive, got {}x{}",
            content.width, content.height
        )));
    }
    if !bound.is_finite() || bound.width < 0.0 || bound.height < 0.0 {
        return Err(PanelkitError::config(format!(
            "scale_to_fit bound size must be non-negative, got {}x{}",
            bound.width, bound.height
        )));
    }

    let scale_x = bound.width / content.width;
    let scale_y = bound.height / content.height;
    if scale_x >= 1.0 && scale_y >= 1.0 {
        return Ok(content);
    }

    let aspect_ratio = content.width / content.height;
    let (width, height) = if scale_x < scale_y {
        (bound.width, bound.width / aspect_ratio)
    } else {
        (bound.height * aspect_ratio, bound.height)
    };

    Ok(Size::new(
        width.round().min(bound.width.floor()),
        height.round().min(bound.height.floor()),
    ))
}

/// Parent-relative anchor of a node: `parent.origin + parent.size * layout.pos`, snapped to the
/// pixel grid by truncation.
pub fn layout_origin(parent: Rect, layout: &NormalizedLayout) -> Point {
    Point::new(
        (parent.x0 + parent.width() * layout.pos[0]).trunc(),
        (parent.y0 + parent.height() * layout.pos[1]).trunc(),
    )
}

/// Compute a child rectangle from its parent rectangle and normalized layout.
///
/// Returns the rectangle together with the aspect ratio to keep for the next pass. With
/// `fix_aspect_ratio`, a missing ratio is captured from this pass's raw size and an existing one
/// is never replaced.
pub fn layout_child_rect(
    parent: Rect,
    layout: &NormalizedLayout,
    aspect_ratio: Option<f64>,
) -> PanelkitResult<(Rect, Option<f64>)> {
    let mut width = parent.width() * layout.size[0];
    let mut height = parent.height() * layout.size[1];
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(PanelkitError::config(format!(
            "layout produced an invalid raw size {width}x{height}"
        )));
    }

    let mut kept_ratio = aspect_ratio;
    if layout.fix_aspect_ratio {
        let ratio = match aspect_ratio {
            Some(r) => r,
            None => {
                if width <= 0.0 || height <= 0.0 {
                    return Err(PanelkitError::config(format!(
                        "cannot capture an aspect ratio from a degenerate {width}x{height} rect"
                    )));
                }
                width / height
            }
        };
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PanelkitError::config(format!(
                "aspect ratio must be finite and > 0, got {ratio}"
            )));
        }

        if width / ratio > height {
            // height binds
            width = ratio * height;
        } else if height * ratio > width {
            // width binds
            height = width / ratio;
        }
        kept_ratio = Some(ratio);
    }

    let origin = layout_origin(parent, layout);
    let size = Size::new(width.round(), height.round());
    Ok((Rect::from_origin_size(origin, size), kept_ratio))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
