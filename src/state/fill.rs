use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::Revision;
use crate::color::ColorPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillSettings {
    /// Per-channel difference still treated as the seed color
    pub tolerance: u8,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self { tolerance: 16 }
    }
}

/// A rectangle of finished pixels and where it goes on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPatch {
    pub x: i64,
    pub y: i64,
    pub image: RgbaImage,
}

impl RasterPatch {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillState {
    pub revision: Revision,
    pub colors: ColorPair,
    pub settings: FillSettings,
    /// The fill computed at commit time; required on committed states
    pub patch: Option<RasterPatch>,
}
