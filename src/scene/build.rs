use crate::{
    assets::store::AssetStore,
    foundation::error::PanelkitResult,
    node::{
        panels::{FillPanel, ImagePanel, Panel, TextPanel},
        style::InheritedStyle,
        tree::Node,
    },
    scene::model::{NodeDesc, PanelDesc, StyleDesc},
};

/// Instantiate the node tree described by `desc`.
///
/// Styles are taken as written; inheritance is applied separately by
/// [`Node::propagate_font`].
pub fn build_node(desc: &NodeDesc, assets: &AssetStore) -> PanelkitResult<Node> {
    let panel = build_panel(&desc.panel, assets)?;
    let style = build_style(&desc.style, assets)?;

    let mut children = Vec::with_capacity(desc.children.len());
    for child in &desc.children {
        children.push(build_node(child, assets)?);
    }

    Ok(Node::new(desc.layout, panel)?
        .with_style(style)
        .with_children(children))
}

fn build_panel(desc: &PanelDesc, assets: &AssetStore) -> PanelkitResult<Panel> {
    Ok(match desc {
        PanelDesc::Panel { image } => ImagePanel::new(assets.image(image)?.clone()).into(),
        PanelDesc::ColourPanel { colour } => FillPanel::new(*colour).into(),
        PanelDesc::TextPanel { text } => TextPanel::new(text.clone()).into(),
    })
}

fn build_style(desc: &StyleDesc, assets: &AssetStore) -> PanelkitResult<InheritedStyle> {
    let font = match &desc.font {
        Some(key) => Some(assets.font(key)?.clone()),
        None => None,
    };
    Ok(InheritedStyle::new(font, desc.text_colour))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
