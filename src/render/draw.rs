use crate::{
    foundation::core::{Canvas, Rgba8},
    node::tree::Node,
    render::composite::{FrameRGBA, blit_over},
};

/// Dark grey used when no clear color is configured.
pub const DEFAULT_CLEAR_RGBA: [u8; 4] = [50, 50, 50, 255];

/// Frame-level drawing options.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Straight RGBA clear color; `None` leaves the frame transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: Some(DEFAULT_CLEAR_RGBA),
        }
    }
}

impl RenderSettings {
    pub fn clear_frame(&self, canvas: Canvas) -> FrameRGBA {
        let premul = self
            .clear_rgba
            .map(|c| Rgba8::from(c).to_premul())
            .unwrap_or([0, 0, 0, 0]);
        FrameRGBA::cleared(canvas, premul)
    }
}

/// Paint `root` and its descendants in update order. Nodes that were never laid out are skipped
/// along with their subtrees.
pub fn draw_tree(frame: &mut FrameRGBA, root: &Node) {
    let (Some(rect), Some(content)) = (root.computed_rect(), root.content()) else {
        return;
    };
    blit_over(frame, content, rect.origin());
    for child in root.children() {
        draw_tree(frame, child);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
