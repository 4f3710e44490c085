use thiserror::Error;

/// Failures surfaced by visualization backends and the stage.
///
/// Initialization errors are fatal for the instance that raised them; there is
/// no fallback rendering path. Transient not-ready states are not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VizError {
    #[error("no 2d context available for the {layer} canvas")]
    NoCanvasContext { layer: &'static str },
    #[error("no rendering context: {0}")]
    NoRenderingContext(String),
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },
    #[error("render failed: {0}")]
    Render(String),
    #[error("dom error: {0}")]
    Dom(String),
}

impl VizError {
    /// Whether the error ends the visualization instance.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, VizError::Render(_))
    }
}
