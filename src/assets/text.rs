use std::{collections::HashMap, sync::Arc};

use crate::{
    foundation::{
        core::Rgba8,
        error::{PanelkitError, PanelkitResult},
    },
    render::surface::Surface,
};

/// Font handle: raw font bytes plus the pixel size text is rendered at.
///
/// Cloning is cheap; clones share the same bytes, which is how styles are handed down a tree.
#[derive(Clone)]
pub struct FontAsset {
    name: String,
    bytes: Arc<Vec<u8>>,
    size_px: f32,
}

impl FontAsset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, size_px: f32) -> PanelkitResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PanelkitError::config("font size_px must be finite and > 0"));
        }
        Ok(Self {
            name: name.into(),
            bytes: Arc::new(bytes),
            size_px,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_key(&self) -> usize {
        Arc::as_ptr(&self.bytes) as usize
    }
}

impl PartialEq for FontAsset {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
            && self.size_px == other.size_px
            && self.name == other.name
    }
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("name", &self.name)
            .field("bytes_len", &self.bytes.len())
            .field("size_px", &self.size_px)
            .finish()
    }
}

/// Text rasterization service used by text panels.
pub trait TextRenderer {
    /// Render `text` at its natural size. The result is premultiplied.
    fn render_text(
        &mut self,
        font: &FontAsset,
        text: &str,
        color: Rgba8,
    ) -> PanelkitResult<Surface>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A font registered with the Parley collection.
///
/// Holds its own handle on the font bytes, so the allocation address used as the cache key stays
/// owned by this entry for as long as the entry exists.
struct RegisteredFont {
    bytes: Arc<Vec<u8>>,
    family: String,
    glyph_font: vello_cpu::peniko::FontData,
}

/// [`TextRenderer`] shaping with Parley and rasterizing with `vello_cpu`.
pub struct ParleyTextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    fonts: HashMap<usize, RegisteredFont>,
}

impl Default for ParleyTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyTextRenderer {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
        }
    }

    fn register(&mut self, font: &FontAsset) -> PanelkitResult<&RegisteredFont> {
        let key = font.bytes_key();
        let cached = self
            .fonts
            .get(&key)
            .is_some_and(|f| Arc::ptr_eq(&f.bytes, &font.bytes));
        if !cached {
            let families = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PanelkitError::asset(format!(
                    "font '{}' registered no font families",
                    font.name()
                ))
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| {
                    PanelkitError::asset(format!("font '{}' family has no name", font.name()))
                })?
                .to_string();
            let glyph_font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                0,
            );
            tracing::debug!(font = font.name(), family = %family, "registered font");

            self.fonts.insert(
                key,
                RegisteredFont {
                    bytes: Arc::clone(&font.bytes),
                    family,
                    glyph_font,
                },
            );
        }

        self.fonts
            .get(&key)
            .ok_or_else(|| PanelkitError::asset(format!("font '{}' is not registered", font.name())))
    }

    fn layout_plain(
        &mut self,
        text: &str,
        family_name: String,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextRenderer for ParleyTextRenderer {
    fn render_text(
        &mut self,
        font: &FontAsset,
        text: &str,
        color: Rgba8,
    ) -> PanelkitResult<Surface> {
        let registered = self.register(font)?;
        let family_name = registered.family.clone();
        let glyph_font = registered.glyph_font.clone();
        if text.is_empty() {
            return Ok(Surface::empty(0, 0));
        }

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.layout_plain(text, family_name, font.size_px(), brush);

        let mut w = 0.0f64;
        let mut h = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            w = w.max(f64::from(m.advance));
            h += f64::from(m.ascent + m.descent + m.leading);
        }
        let width: u16 = (w.ceil().max(1.0) as u32)
            .try_into()
            .map_err(|_| PanelkitError::render("rendered text width exceeds u16"))?;
        let height: u16 = (h.ceil().max(1.0) as u32)
            .try_into()
            .map_err(|_| PanelkitError::render("rendered text height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&glyph_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        Surface::from_premul_bytes(
            u32::from(width),
            u32::from(height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
