use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::Revision;
use crate::color::ColorPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampSettings {
    /// Rotation in radians
    pub angle: f32,
    pub scale: f32,
    /// Index into the stamp library
    pub image_index: usize,
}

impl Default for StampSettings {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            image_index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StampState {
    pub revision: Revision,
    pub colors: ColorPair,
    pub settings: StampSettings,
    /// Canvas point the stamp is centered on
    pub anchor: Pos2,
}
