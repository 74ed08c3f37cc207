use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::Revision;
use crate::color::ColorPair;

/// UI-bound options of the pencil, eraser and spray tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    pub thickness: f32,
    /// Dots per path point, only read by the spray
    pub density: u32,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            thickness: 4.0,
            density: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathState {
    pub revision: Revision,
    pub colors: ColorPair,
    pub settings: PathSettings,
    /// Working point set the tool accumulates and draws from
    pub points: Vec<Pos2>,
    /// Finalized point list of the committed stroke
    pub path: Vec<Pos2>,
}
