use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::{
        decode::{ImageAsset, decode_image},
        text::FontAsset,
    },
    foundation::error::{PanelkitError, PanelkitResult},
    scene::model::{AssetDesc, SceneDesc},
};

/// Loaded images and fonts keyed by their scene asset keys.
///
/// All file IO happens in [`AssetStore::prepare`]; lookups during layout never touch disk.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    images: HashMap<String, ImageAsset>,
    fonts: HashMap<String, FontAsset>,
}

impl AssetStore {
    /// Empty store for programmatic construction.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Load every asset `desc` declares, resolving sources against `root`.
    pub fn prepare(desc: &SceneDesc, root: impl Into<PathBuf>) -> PanelkitResult<Self> {
        let mut out = Self::new(root);
        for (key, asset) in &desc.assets {
            match asset {
                AssetDesc::Image { source } => {
                    let bytes = out.read_bytes(source)?;
                    let image = decode_image(&bytes)
                        .map_err(|e| PanelkitError::asset(format!("image '{key}': {e}")))?;
                    out.insert_image(key.clone(), image);
                }
                AssetDesc::Font { source, size_px } => {
                    let bytes = out.read_bytes(source)?;
                    out.insert_font(key.clone(), FontAsset::new(key.clone(), bytes, *size_px)?);
                }
            }
        }
        tracing::debug!(
            images = out.images.len(),
            fonts = out.fonts.len(),
            root = %out.root.display(),
            "prepared scene assets"
        );
        Ok(out)
    }

    /// Root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn insert_image(&mut self, key: impl Into<String>, image: ImageAsset) {
        self.images.insert(key.into(), image);
    }

    pub fn insert_font(&mut self, key: impl Into<String>, font: FontAsset) {
        self.fonts.insert(key.into(), font);
    }

    pub fn image(&self, key: &str) -> PanelkitResult<&ImageAsset> {
        self.images
            .get(key)
            .ok_or_else(|| PanelkitError::asset(format!("unknown image asset '{key}'")))
    }

    pub fn font(&self, key: &str) -> PanelkitResult<&FontAsset> {
        self.fonts
            .get(key)
            .ok_or_else(|| PanelkitError::asset(format!("unknown font asset '{key}'")))
    }

    fn read_bytes(&self, source: &str) -> PanelkitResult<Vec<u8>> {
        let path = self.root.join(Path::new(&normalize_rel_path(source)?));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(PanelkitError::from)
    }
}

/// Normalize and validate scene-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PanelkitResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PanelkitError::config("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PanelkitError::config("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PanelkitError::config("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PanelkitError::config("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
