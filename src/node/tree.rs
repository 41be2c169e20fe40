use std::ops::AddAssign;

use crate::{
    assets::text::TextRenderer,
    foundation::{
        core::{Rect, Size},
        error::{PanelkitError, PanelkitResult},
    },
    layout::geometry::{NormalizedLayout, layout_child_rect, layout_origin},
    node::{
        panels::{Panel, RegenCtx, Regenerate, Sizing, TextPanel},
        style::InheritedStyle,
    },
    render::surface::Surface,
};

/// Counters for one `update` traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Nodes reached by the traversal.
    pub visited: usize,
    /// Nodes whose content was regenerated.
    pub regenerated: usize,
}

impl AddAssign for UpdateStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.regenerated += rhs.regenerated;
    }
}

/// A retained UI node: layout parameters, cached geometry, rendered content and children.
///
/// Children are updated and drawn in insertion order, always after their parent.
#[derive(Clone, Debug)]
pub struct Node {
    layout: NormalizedLayout,
    panel: Panel,
    style: InheritedStyle,
    children: Vec<Node>,
    last_parent_rect: Option<Rect>,
    computed_rect: Option<Rect>,
    aspect_ratio: Option<f64>,
    content: Option<Surface>,
}

impl Node {
    /// Image panels start with their aspect ratio locked to the source image.
    pub fn new(layout: NormalizedLayout, panel: impl Into<Panel>) -> PanelkitResult<Self> {
        layout.validate()?;
        let panel = panel.into();
        let aspect_ratio = match &panel {
            Panel::Image(p) => Some(p.image().natural_aspect_ratio()?),
            Panel::Fill(_) | Panel::Text(_) => None,
        };
        Ok(Self {
            layout,
            panel,
            style: InheritedStyle::default(),
            children: Vec::new(),
            last_parent_rect: None,
            computed_rect: None,
            aspect_ratio,
            content: None,
        })
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_style(mut self, style: InheritedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn layout(&self) -> &NormalizedLayout {
        &self.layout
    }

    /// Replace the layout; the next `update` recomputes the rectangle even if the parent
    /// rectangle is unchanged. A captured aspect ratio is kept.
    pub fn set_layout(&mut self, layout: NormalizedLayout) -> PanelkitResult<()> {
        layout.validate()?;
        if layout != self.layout {
            self.layout = layout;
            self.last_parent_rect = None;
        }
        Ok(())
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn text_panel(&self) -> Option<&TextPanel> {
        match &self.panel {
            Panel::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_panel_mut(&mut self) -> Option<&mut TextPanel> {
        match &mut self.panel {
            Panel::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn style(&self) -> &InheritedStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut InheritedStyle {
        &mut self.style
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Detach a child; its content goes with it.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn computed_rect(&self) -> Option<Rect> {
        self.computed_rect
    }

    pub fn last_parent_rect(&self) -> Option<Rect> {
        self.last_parent_rect
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    pub fn content(&self) -> Option<&Surface> {
        self.content.as_ref()
    }

    /// Content-driven invalidation, independent of the parent rectangle.
    pub fn is_dirty(&self) -> bool {
        self.panel.is_dirty()
    }

    /// Per-frame update: relayout and regenerate when the parent rectangle changed or the node is
    /// dirty, then update every child against this node's fresh rectangle.
    pub fn update(
        &mut self,
        parent_rect: Rect,
        dt: f64,
        text: &mut dyn TextRenderer,
    ) -> PanelkitResult<UpdateStats> {
        let mut stats = UpdateStats {
            visited: 1,
            regenerated: 0,
        };

        if self.last_parent_rect != Some(parent_rect) || self.is_dirty() {
            self.regenerate(parent_rect, text)?;
            stats.regenerated += 1;
        } else {
            tracing::trace!(kind = self.panel.kind(), "reusing cached content");
        }

        let rect = self.computed_rect.ok_or_else(|| {
            PanelkitError::render("node has no computed rect after layout")
        })?;
        for child in &mut self.children {
            stats += child.update(rect, dt, text)?;
        }
        Ok(stats)
    }

    fn regenerate(&mut self, parent_rect: Rect, text: &mut dyn TextRenderer) -> PanelkitResult<()> {
        let sizing = self.panel.sizing();
        let (rect, aspect_ratio) = match sizing {
            Sizing::Proportional => {
                layout_child_rect(parent_rect, &self.layout, self.aspect_ratio)?
            }
            Sizing::Content => (
                Rect::from_origin_size(layout_origin(parent_rect, &self.layout), Size::ZERO),
                self.aspect_ratio,
            ),
        };

        let surface = self.panel.regenerate(&mut RegenCtx {
            rect,
            parent_rect,
            style: &self.style,
            text,
        })?;

        let rect = match sizing {
            Sizing::Proportional => rect,
            Sizing::Content => Rect::from_origin_size(rect.origin(), surface.size()),
        };
        tracing::debug!(
            kind = self.panel.kind(),
            x = rect.x0,
            y = rect.y0,
            width = rect.width(),
            height = rect.height(),
            "regenerated node content"
        );

        self.aspect_ratio = aspect_ratio;
        self.computed_rect = Some(rect);
        self.last_parent_rect = Some(parent_rect);
        self.content = Some(surface);
        Ok(())
    }

    /// Fill every descendant's unset font and text color from this node, recursively.
    pub fn propagate_font(&mut self) {
        for child in &mut self.children {
            child.style.fill_missing_from(&self.style);
            child.propagate_font();
        }
    }

    /// Pre-order walk over this subtree.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/tree.rs"]
mod tests;
