use crate::core::{MountOptions, QualityTier, VisualizationKind};

pub const DEFAULT_CONTAINER_ID: &str = "visualizer";

/// Query keys `AppConfig` understands.
pub const QUERY_KEYS: [&str; 6] = ["viz", "visualization", "quality", "container", "style", "mobile"];

/// Page-level settings, read from the query string
/// (`?viz=rain&quality=high&style=opacity:0.8`).
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub visualization: VisualizationKind,
    pub quality: QualityTier,
    pub container_id: String,
    pub style: Option<String>,
    /// Overrides device detection when set (`mobile=1` / `mobile=0`).
    pub mobile: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            visualization: VisualizationKind::default(),
            quality: QualityTier::default(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            style: None,
            mobile: None,
        }
    }
}

impl AppConfig {
    /// Build from already-decoded query pairs. Unknown keys are ignored and
    /// bad values keep their defaults.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in params {
            let value = value.trim();
            match key {
                "viz" | "visualization" => match value.parse() {
                    Ok(kind) => config.visualization = kind,
                    Err(e) => log::warn!("[config] {e}"),
                },
                "quality" => match value.parse() {
                    Ok(q) => config.quality = q,
                    Err(e) => log::warn!("[config] {e}"),
                },
                "container" if !value.is_empty() => config.container_id = value.to_string(),
                "style" if !value.is_empty() => config.style = Some(value.to_string()),
                "mobile" => match value {
                    "1" | "true" | "yes" => config.mobile = Some(true),
                    "0" | "false" | "no" => config.mobile = Some(false),
                    other => log::warn!("[config] bad mobile flag '{other}'"),
                },
                _ => {}
            }
        }
        config
    }

    /// `detected_mobile` applies unless the query overrode it.
    pub fn mount_options(&self, detected_mobile: bool) -> MountOptions {
        MountOptions {
            quality: self.quality,
            style: self.style.clone(),
            mobile: self.mobile.unwrap_or(detected_mobile),
        }
    }
}
