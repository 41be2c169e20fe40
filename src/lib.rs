//! Panelkit is a retained-mode UI panel library for 2D games.
//!
//! A UI is a tree of [`Node`]s. Each node places itself inside its parent's rectangle with a
//! [`NormalizedLayout`] (position and size as fractions of the parent), caches the surface it
//! rendered, and only regenerates that surface when its parent rectangle changes or its own
//! content is marked dirty.
//!
//! # Frame overview
//!
//! 1. **Update**: every root is laid out against the screen rectangle. Changed subtrees relayout
//!    and re-render; steady subtrees do no work.
//! 2. **Collide**: an optional [`CollisionResolver`] runs once.
//! 3. **Draw**: cached surfaces are composited parent-before-child onto a cleared [`FrameRGBA`].
//! 4. **Advance**: every [`Updatable`] receives the frame's `dt`.
//!
//! [`Scene`] sequences these steps. Scenes can be assembled in code or loaded from JSON through
//! [`SceneDesc`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO during frames**: files are read up front by [`AssetStore`].
//! - **Premultiplied RGBA8** everywhere pixels are stored.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod layout;
mod node;
mod render;
mod scene;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use assets::decode::{ImageAsset, decode_image};
pub use assets::store::{AssetStore, normalize_rel_path};
pub use assets::text::{FontAsset, ParleyTextRenderer, TextBrushRgba8, TextRenderer};
pub use foundation::core::{Canvas, Point, Rect, Rgba8, Size, Vec2, pixel_dims};
pub use foundation::error::{PanelkitError, PanelkitResult};
pub use layout::geometry::{NormalizedLayout, layout_child_rect, layout_origin, scale_to_fit};
pub use node::panels::{FillPanel, ImagePanel, Panel, TextPanel};
pub use node::style::InheritedStyle;
pub use node::tree::{Node, UpdateStats};
pub use render::composite::{FrameRGBA, PremulRgba8, blit_over};
pub use render::draw::{DEFAULT_CLEAR_RGBA, RenderSettings, draw_tree};
pub use render::surface::Surface;
pub use scene::build::build_node;
pub use scene::model::{AssetDesc, NodeDesc, PanelDesc, SceneDesc, StyleDesc};
pub use scene::runtime::{CollisionResolver, Scene, Updatable};
