use egui::Color32;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// The two active colors. Every tool snapshot carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub primary: Color32,
    pub secondary: Color32,
}

impl ColorPair {
    pub fn new(primary: Color32, secondary: Color32) -> Self {
        Self { primary, secondary }
    }

    pub fn swapped(self) -> Self {
        Self {
            primary: self.secondary,
            secondary: self.primary,
        }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Color32::BLACK, Color32::WHITE)
    }
}

/// The shared, UI-bound color configuration.
///
/// `revision` increases on every write so swatches and other color-dependent
/// widgets can tell that they are stale, even when a replay wrote the same
/// pair back.
#[derive(Debug, Clone, Default)]
pub struct ColorConfig {
    pair: ColorPair,
    revision: u64,
}

impl ColorConfig {
    pub fn new(pair: ColorPair) -> Self {
        Self { pair, revision: 0 }
    }

    pub fn pair(&self) -> ColorPair {
        self.pair
    }

    pub fn primary(&self) -> Color32 {
        self.pair.primary
    }

    pub fn secondary(&self) -> Color32 {
        self.pair.secondary
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_pair(&mut self, pair: ColorPair) {
        self.pair = pair;
        self.revision += 1;
    }

    pub fn swap(&mut self) {
        self.set_pair(self.pair.swapped());
    }
}

/// Convert an egui color to a raster pixel
pub fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

/// Convert a raster pixel to an egui color
pub fn from_rgba(pixel: Rgba<u8>) -> Color32 {
    let [r, g, b, a] = pixel.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
