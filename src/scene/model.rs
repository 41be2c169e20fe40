use std::collections::BTreeMap;

use crate::{
    assets::store::normalize_rel_path,
    foundation::{
        core::{Canvas, Rgba8},
        error::{PanelkitError, PanelkitResult},
    },
    layout::geometry::NormalizedLayout,
    render::draw::DEFAULT_CLEAR_RGBA,
};

fn default_clear_rgba() -> Option<[u8; 4]> {
    Some(DEFAULT_CLEAR_RGBA)
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Declarative description of a UI scene.
///
/// A scene is plain data: it can be written by hand as JSON or built in code, and is turned into
/// a live [`crate::Scene`] by [`crate::Scene::from_desc`].
pub struct SceneDesc {
    /// Screen size handed to root nodes each frame.
    pub canvas: Canvas,
    /// Straight RGBA clear color. Absent means the default dark grey; `null` leaves the frame
    /// transparent.
    #[serde(default = "default_clear_rgba")]
    pub clear_rgba: Option<[u8; 4]>,
    /// Asset table keyed by stable user-facing keys.
    #[serde(default)]
    pub assets: BTreeMap<String, AssetDesc>,
    /// Top-level nodes, updated and drawn in order.
    pub roots: Vec<NodeDesc>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type")]
/// Externally loaded asset.
pub enum AssetDesc {
    /// Raster image file (PNG, JPEG, ...).
    Image { source: String },
    /// Font file rendered at a fixed pixel size.
    Font { source: String, size_px: f32 },
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One node of the scene tree.
pub struct NodeDesc {
    /// Variant tag plus its content parameters.
    pub panel: PanelDesc,
    /// Parent-relative placement.
    #[serde(default)]
    pub layout: NormalizedLayout,
    /// Explicit style; unset fields are inherited.
    #[serde(default)]
    pub style: StyleDesc,
    /// Child nodes in paint order.
    #[serde(default)]
    pub children: Vec<NodeDesc>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type")]
/// Node variant, keyed by the `type` tag.
pub enum PanelDesc {
    /// Image panel showing the image asset `image`.
    Panel { image: String },
    /// Solid color panel.
    ColourPanel { colour: Rgba8 },
    /// Self-sizing text panel.
    TextPanel { text: String },
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
/// Style overrides by asset key.
pub struct StyleDesc {
    /// Font asset key.
    #[serde(default)]
    pub font: Option<String>,
    /// Straight RGBA text color.
    #[serde(default)]
    pub text_colour: Option<Rgba8>,
}

impl SceneDesc {
    /// Parse a scene from JSON text.
    pub fn from_json(json: &str) -> PanelkitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check canvas, asset sources, layouts and every asset reference.
    pub fn validate(&self) -> PanelkitResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(PanelkitError::config("canvas width/height must be > 0"));
        }
        for (key, asset) in &self.assets {
            match asset {
                AssetDesc::Image { source } => {
                    normalize_rel_path(source).map_err(|e| {
                        PanelkitError::config(format!("asset '{key}' source: {e}"))
                    })?;
                }
                AssetDesc::Font { source, size_px } => {
                    normalize_rel_path(source).map_err(|e| {
                        PanelkitError::config(format!("asset '{key}' source: {e}"))
                    })?;
                    if !size_px.is_finite() || *size_px <= 0.0 {
                        return Err(PanelkitError::config(format!(
                            "font asset '{key}' size_px must be finite and > 0"
                        )));
                    }
                }
            }
        }
        for (idx, root) in self.roots.iter().enumerate() {
            self.validate_node(root, &format!("roots[{idx}]"))?;
        }
        Ok(())
    }

    fn validate_node(&self, node: &NodeDesc, path: &str) -> PanelkitResult<()> {
        node.layout
            .validate()
            .map_err(|e| PanelkitError::config(format!("{path}: {e}")))?;

        if let PanelDesc::Panel { image } = &node.panel
            && !matches!(self.assets.get(image), Some(AssetDesc::Image { .. }))
        {
            return Err(PanelkitError::config(format!(
                "{path} references missing image asset '{image}'"
            )));
        }
        if let Some(font) = &node.style.font
            && !matches!(self.assets.get(font), Some(AssetDesc::Font { .. }))
        {
            return Err(PanelkitError::config(format!(
                "{path} references missing font asset '{font}'"
            )));
        }

        for (idx, child) in node.children.iter().enumerate() {
            self.validate_node(child, &format!("{path}.children[{idx}]"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
