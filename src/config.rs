//! Application configuration, read from an optional YAML file.
//!
//! Every section and key may be omitted; missing values fall back to the
//! defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const CONFIG_FILE_NAME: &str = "imgui-basic-window.yaml";

/// RGBA colour with 8 bits per channel.
pub type Rgba = [u8; 4];

pub const RAY_WHITE: Rgba = [245, 245, 245, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// Largest banner font the atlas is asked to rasterize, in pixels.
pub const MAX_BANNER_SIZE: f32 = 256.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub background: Background,
    pub overlay: OverlayConfig,
    pub banner: BannerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second to aim for. 0 renders as fast as the loop spins.
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "imgui basic window".to_string(),
            width: 800,
            height: 600,
            target_fps: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Background(pub Rgba);

impl Default for Background {
    fn default() -> Self {
        Background(RAY_WHITE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub dark_style: bool,
    pub show_demo_window: bool,
    pub panel_title: String,
    pub panel_text: String,
    pub close_on_escape: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            dark_style: true,
            show_demo_window: true,
            panel_title: "Hello".to_string(),
            panel_text: "Hello, world!".to_string(),
            close_on_escape: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Font size in pixels.
    pub size: f32,
    pub color: Rgba,
}

impl Default for BannerConfig {
    fn default() -> Self {
        BannerConfig {
            text: "It works!".to_string(),
            x: 20.0,
            y: 20.0,
            size: 20.0,
            color: BLACK,
        }
    }
}

impl AppConfig {
    /// Reads `imgui-basic-window.yaml` from the working directory, or returns
    /// the defaults when there is no such file.
    pub fn load() -> Result<Self, AppError> {
        let path = Path::new(CONFIG_FILE_NAME);
        if !path.exists() {
            log::info!("No {CONFIG_FILE_NAME} found, using default configuration");
            return Ok(AppConfig::default());
        }
        Self::load_from_yaml(path)
    }

    pub fn load_from_yaml(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let yaml_content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml_str(&yaml_content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, AppError> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml_content.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        let config: AppConfig = serde_yaml::from_str(yaml_content)
            .map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(AppError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.banner.size > 0.0 && self.banner.size <= MAX_BANNER_SIZE) {
            return Err(AppError::Config(format!(
                "banner size must be in (0, {MAX_BANNER_SIZE}], got {}",
                self.banner.size
            )));
        }
        if !(self.banner.x.is_finite() && self.banner.y.is_finite()) {
            return Err(AppError::Config(format!(
                "banner position must be finite, got ({}, {})",
                self.banner.x, self.banner.y
            )));
        }
        if self.overlay.panel_title.is_empty() {
            return Err(AppError::Config("panel title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Converts an 8-bit colour to the normalized floats ImGui and glium use.
pub fn to_rgba_f32(color: Rgba) -> [f32; 4] {
    color.map(|channel| channel as f32 / 255.0)
}
