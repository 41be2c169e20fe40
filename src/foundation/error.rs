/// Convenience result type used across panelkit.
pub type PanelkitResult<T> = Result<T, PanelkitError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PanelkitError {
    /// Degenerate geometry or invalid layout/scene data.
    #[error("configuration error: {0}")]
    Config(String),

    /// A node needed a style field (font, text color) that was never set or propagated.
    #[error("missing style: {0}")]
    MissingStyle(String),

    /// An asset could not be resolved or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Surface generation or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanelkitError {
    /// Build a [`PanelkitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PanelkitError::MissingStyle`] value.
    pub fn missing_style(msg: impl Into<String>) -> Self {
        Self::MissingStyle(msg.into())
    }

    /// Build a [`PanelkitError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PanelkitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PanelkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PanelkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
