use std::path::PathBuf;

use crate::{
    assets::{store::AssetStore, text::TextRenderer},
    foundation::{
        core::Canvas,
        error::{PanelkitError, PanelkitResult},
    },
    node::tree::{Node, UpdateStats},
    render::{
        composite::FrameRGBA,
        draw::{RenderSettings, draw_tree},
    },
    scene::{build::build_node, model::SceneDesc},
};

/// Collision detection and response, run once per frame between layout and drawing.
pub trait CollisionResolver {
    fn resolve_collisions(&mut self) -> PanelkitResult<()>;
}

/// Non-UI state advanced once per frame, after the frame has been drawn.
pub trait Updatable {
    fn update(&mut self, dt: f64) -> PanelkitResult<()>;
}

/// Frame orchestrator: owns the root render group and sequences one frame of work.
pub struct Scene {
    canvas: Canvas,
    settings: RenderSettings,
    roots: Vec<Node>,
    text: Box<dyn TextRenderer>,
    collisions: Option<Box<dyn CollisionResolver>>,
    updatables: Vec<Box<dyn Updatable>>,
    frames: u64,
}

impl Scene {
    pub fn new(canvas: Canvas, settings: RenderSettings, text: Box<dyn TextRenderer>) -> Self {
        Self {
            canvas,
            settings,
            roots: Vec::new(),
            text,
            collisions: None,
            updatables: Vec::new(),
            frames: 0,
        }
    }

    /// Validate `desc`, load its assets relative to `root`, build every root node and propagate
    /// styles down each tree.
    #[tracing::instrument(skip(desc, text))]
    pub fn from_desc(
        desc: &SceneDesc,
        root: PathBuf,
        text: Box<dyn TextRenderer>,
    ) -> PanelkitResult<Self> {
        desc.validate()?;
        let assets = AssetStore::prepare(desc, root)?;

        let settings = RenderSettings {
            clear_rgba: desc.clear_rgba,
        };

        let mut scene = Self::new(desc.canvas, settings, text);
        for node in &desc.roots {
            scene.push_root(build_node(node, &assets)?);
        }
        scene.propagate_styles();
        Ok(scene)
    }

    pub fn with_collisions(mut self, collisions: Box<dyn CollisionResolver>) -> Self {
        self.collisions = Some(collisions);
        self
    }

    pub fn add_updatable(&mut self, updatable: Box<dyn Updatable>) {
        self.updatables.push(updatable);
    }

    pub fn push_root(&mut self, node: Node) {
        self.roots.push(node);
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut [Node] {
        &mut self.roots
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Resize the screen; roots relayout on the next update.
    pub fn set_canvas(&mut self, canvas: Canvas) -> PanelkitResult<()> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(PanelkitError::config("canvas width/height must be > 0"));
        }
        self.canvas = canvas;
        Ok(())
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run style propagation from every root. Intended once, after the tree is assembled.
    pub fn propagate_styles(&mut self) {
        for root in &mut self.roots {
            root.propagate_font();
        }
    }

    /// Layout pass over every root against the screen rectangle.
    pub fn update(&mut self, dt: f64) -> PanelkitResult<UpdateStats> {
        let screen = self.canvas.rect();
        let mut stats = UpdateStats::default();
        for root in &mut self.roots {
            stats += root.update(screen, dt, self.text.as_mut())?;
        }
        Ok(stats)
    }

    /// Compose the current tree state into a fresh frame.
    pub fn draw(&self) -> FrameRGBA {
        let mut frame = self.settings.clear_frame(self.canvas);
        for root in &self.roots {
            draw_tree(&mut frame, root);
        }
        frame
    }

    /// One frame: layout, collision resolution, draw, then updatables.
    #[tracing::instrument(skip(self), fields(frame = self.frames))]
    pub fn frame(&mut self, dt: f64) -> PanelkitResult<FrameRGBA> {
        let stats = self.update(dt)?;
        tracing::debug!(
            visited = stats.visited,
            regenerated = stats.regenerated,
            "layout pass complete"
        );

        if let Some(collisions) = self.collisions.as_mut() {
            collisions.resolve_collisions()?;
        }

        let frame = self.draw();

        for updatable in &mut self.updatables {
            updatable.update(dt)?;
        }
        self.frames += 1;
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/runtime.rs"]
mod tests;
