//! Rasterizer settings, stored as RON (Rusty Object Notation)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::blend::BlendMode;
use super::camera::DEFAULT_NEAR;
use super::error::Result;
use super::state::{CullFace, RenderState};
use super::types::Color;
use super::{HEIGHT, WIDTH};

fn default_fov() -> f32 {
    45.0
}

fn default_near() -> f32 {
    DEFAULT_NEAR
}

/// Everything needed to set up a `Rasterizer` and its camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSettings {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    /// RGBA, each channel in [0, 1]
    #[serde(default)]
    pub clear_color: [f32; 4],
    /// `None` disables face culling
    #[serde(default)]
    pub cull: Option<CullFace>,
    #[serde(default)]
    pub blend: BlendMode,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fov: default_fov(),
            near: default_near(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            cull: Some(CullFace::Back),
            blend: BlendMode::Set,
        }
    }
}

impl RasterSettings {
    /// The render state these settings describe. Fails on an out-of-range
    /// clear color.
    pub fn render_state(&self) -> Result<RenderState> {
        let [r, g, b, a] = self.clear_color;
        Ok(RenderState {
            clear_color: Color::new(r, g, b, a)?,
            cull_enabled: self.cull.is_some(),
            cull_face: self.cull.unwrap_or_default(),
            blend: self.blend,
        })
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }
}

/// Load settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<RasterSettings> {
    let contents = fs::read_to_string(path.as_ref())?;
    let settings = load_settings_from_str(&contents)?;
    log::info!("Loaded settings from {}", path.as_ref().display());
    Ok(settings)
}

/// Load settings from a RON string
pub fn load_settings_from_str(s: &str) -> Result<RasterSettings> {
    let settings: RasterSettings = ron::from_str(s)?;
    // Reject bad colors at load time rather than at first render
    settings.render_state()?;
    Ok(settings)
}

/// Save settings to a RON file
pub fn save_settings<P: AsRef<Path>>(settings: &RasterSettings, path: P) -> Result<()> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(settings, config)?;
    fs::write(path, contents)?;
    Ok(())
}
