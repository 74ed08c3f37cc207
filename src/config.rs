use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "REPLAY_PAINT_CONFIG";

/// Largest canvas edge the editor accepts, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 8192;

/// Startup configuration of the editor.
///
/// Loaded from a JSON file; every field is optional in the file and falls
/// back to [`EditorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of a new canvas
    pub canvas_width: u32,
    /// Height of a new canvas
    pub canvas_height: u32,
    /// Fill used by `Canvas::fill_background`, the eraser and cleared selections
    pub background: Color32,
    /// Active primary color at startup
    pub primary: Color32,
    /// Active secondary color at startup
    pub secondary: Color32,
    /// Starting thickness of the pencil and eraser
    pub thickness: f32,
    /// Delay before a replayed resize reloads its source raster
    pub resize_settle_ms: u64,
    /// Distance in pixels at which a dragged selection snaps to the canvas edges
    pub magnet_distance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Color32::WHITE,
            primary: Color32::BLACK,
            secondary: Color32::WHITE,
            thickness: 4.0,
            resize_settle_ms: 100,
            magnet_distance: 8.0,
        }
    }
}

impl EditorConfig {
    /// Read a config file and validate it
    pub fn load(path: &Path) -> EditorResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if one is given, otherwise use the defaults.
    ///
    /// A broken config file is reported and replaced by the defaults so the
    /// editor still starts.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|err| {
                log::error!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> EditorResult<()> {
        validate_canvas_size(self.canvas_width, self.canvas_height)
    }

    pub fn resize_settle_secs(&self) -> f64 {
        self.resize_settle_ms as f64 / 1000.0
    }
}

/// Reject canvas dimensions that are empty or unreasonably large
pub fn validate_canvas_size(width: u32, height: u32) -> EditorResult<()> {
    if width == 0 || height == 0 || width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
        return Err(EditorError::InvalidCanvasSize { width, height });
    }
    Ok(())
}
