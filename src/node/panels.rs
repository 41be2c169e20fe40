use crate::{
    assets::{decode::ImageAsset, text::TextRenderer},
    foundation::{
        core::{Rect, Rgba8, pixel_dims},
        error::{PanelkitError, PanelkitResult},
    },
    layout::geometry::scale_to_fit,
    node::style::InheritedStyle,
    render::surface::Surface,
};

/// How a variant derives its rectangle from the parent rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Sizing {
    /// `layout_child_rect`: fractions of the parent, optionally aspect-locked.
    Proportional,
    /// Anchored at the layout position, sized by the rendered content.
    Content,
}

/// Inputs for one content regeneration. Only built after a rectangle exists.
pub(crate) struct RegenCtx<'a> {
    pub(crate) rect: Rect,
    pub(crate) parent_rect: Rect,
    pub(crate) style: &'a InheritedStyle,
    pub(crate) text: &'a mut dyn TextRenderer,
}

/// Content strategy of a node variant.
pub(crate) trait Regenerate {
    fn sizing(&self) -> Sizing {
        Sizing::Proportional
    }

    /// Request regeneration even when the parent rectangle did not change.
    fn is_dirty(&self) -> bool {
        false
    }

    /// Produce fresh content for `cx.rect`. Same rectangle and content state, same output.
    fn regenerate(&mut self, cx: &mut RegenCtx<'_>) -> PanelkitResult<Surface>;
}

/// Shows a source image stretched to the node rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePanel {
    image: ImageAsset,
}

impl ImagePanel {
    pub fn new(image: ImageAsset) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &ImageAsset {
        &self.image
    }
}

impl Regenerate for ImagePanel {
    fn regenerate(&mut self, cx: &mut RegenCtx<'_>) -> PanelkitResult<Surface> {
        let (w, h) = pixel_dims(cx.rect.size())?;
        Ok(self.image.surface().scaled(w, h))
    }
}

/// Solid color rectangle; alpha is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillPanel {
    color: Rgba8,
}

impl FillPanel {
    pub fn new(color: Rgba8) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }
}

impl Regenerate for FillPanel {
    fn regenerate(&mut self, cx: &mut RegenCtx<'_>) -> PanelkitResult<Surface> {
        let (w, h) = pixel_dims(cx.rect.size())?;
        Ok(Surface::solid(w, h, self.color))
    }
}

/// Single run of text sized by its rendering, shrunk to fit the parent when it overflows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextPanel {
    text: String,
    text_dirty: bool,
}

impl TextPanel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_dirty: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Marks the panel dirty only when the value actually changes; a pending
    /// change stays pending until the next render.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text_dirty = true;
        }
        self.text = text;
    }

    pub fn text_dirty(&self) -> bool {
        self.text_dirty
    }
}

impl Regenerate for TextPanel {
    fn sizing(&self) -> Sizing {
        Sizing::Content
    }

    fn is_dirty(&self) -> bool {
        self.text_dirty
    }

    fn regenerate(&mut self, cx: &mut RegenCtx<'_>) -> PanelkitResult<Surface> {
        let font = cx.style.font.as_ref().ok_or_else(|| {
            PanelkitError::missing_style(format!("text panel '{}' has no font", self.text))
        })?;
        let color = cx.style.text_color.ok_or_else(|| {
            PanelkitError::missing_style(format!("text panel '{}' has no text color", self.text))
        })?;

        let mut surface = cx.text.render_text(font, &self.text, color)?;
        let bound = cx.parent_rect.size();
        let natural = surface.size();
        if !surface.is_empty() && (natural.width > bound.width || natural.height > bound.height) {
            let (w, h) = pixel_dims(scale_to_fit(natural, bound)?)?;
            surface = surface.scaled(w, h);
        }

        self.text_dirty = false;
        Ok(surface)
    }
}

/// The closed set of node variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Image(ImagePanel),
    Fill(FillPanel),
    Text(TextPanel),
}

impl Panel {
    /// Type tag, as used by scene descriptions.
    pub fn kind(&self) -> &'static str {
        match self {
            Panel::Image(_) => "Panel",
            Panel::Fill(_) => "ColourPanel",
            Panel::Text(_) => "TextPanel",
        }
    }

    pub fn is_dirty(&self) -> bool {
        Regenerate::is_dirty(self)
    }
}

impl Regenerate for Panel {
    fn sizing(&self) -> Sizing {
        match self {
            Panel::Image(p) => p.sizing(),
            Panel::Fill(p) => p.sizing(),
            Panel::Text(p) => p.sizing(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            Panel::Image(p) => p.is_dirty(),
            Panel::Fill(p) => p.is_dirty(),
            Panel::Text(p) => p.is_dirty(),
        }
    }

    fn regenerate(&mut self, cx: &mut RegenCtx<'_>) -> PanelkitResult<Surface> {
        match self {
            Panel::Image(p) => p.regenerate(cx),
            Panel::Fill(p) => p.regenerate(cx),
            Panel::Text(p) => p.regenerate(cx),
        }
    }
}

impl From<ImagePanel> for Panel {
    fn from(p: ImagePanel) -> Self {
        Panel::Image(p)
    }
}

impl From<FillPanel> for Panel {
    fn from(p: FillPanel) -> Self {
        Panel::Fill(p)
    }
}

impl From<TextPanel> for Panel {
    fn from(p: TextPanel) -> Self {
        Panel::Text(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/panels.rs"]
mod tests;
