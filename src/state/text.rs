use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::Revision;
use crate::color::ColorPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSettings {
    pub font_size: f32,
    pub bold: bool,
    pub underline: bool,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            bold: false,
            underline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub revision: Revision,
    pub colors: ColorPair,
    pub settings: TextSettings,
    pub text: String,
    /// Top-left of the text box
    pub origin: Pos2,
    /// Measured advance width of `text` at commit time
    pub width: f32,
    /// Text box content; derived from `text` when a committed state is assigned
    pub editor_value: String,
    pub display_width: f32,
}
