use crate::{assets::text::FontAsset, foundation::core::Rgba8};

/// Style fields a node may set itself or receive from an ancestor.
///
/// `None` means "not set here"; [`crate::Node::propagate_font`] fills such gaps from the
/// ancestor and never replaces a value that is already present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InheritedStyle {
    pub font: Option<FontAsset>,
    pub text_color: Option<Rgba8>,
}

impl InheritedStyle {
    pub fn new(font: Option<FontAsset>, text_color: Option<Rgba8>) -> Self {
        Self { font, text_color }
    }

    /// Copy each field `parent` has and `self` lacks.
    pub fn fill_missing_from(&mut self, parent: &Self) {
        if self.font.is_none() {
            self.font = parent.font.clone();
        }
        if self.text_color.is_none() {
            self.text_color = parent.text_color;
        }
    }
}
