use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::Revision;
use crate::color::ColorPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSettings {
    pub stroke_width: f32,
    /// Fill the interior with the secondary color
    pub fill: bool,
    /// Outline with the primary color
    pub border: bool,
    /// Corner count of the polygon tool
    pub sides: u32,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            fill: false,
            border: true,
            sides: 5,
        }
    }
}

/// Resolved geometry of one parametric shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rect),
    Ellipse { center: Pos2, radii: Vec2 },
    Polygon(Vec<Pos2>),
}

impl Default for Shape {
    fn default() -> Self {
        Self::Rectangle(Rect::NOTHING)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeState {
    pub revision: Revision,
    pub colors: ColorPair,
    pub settings: ShapeSettings,
    /// Drag start and end
    pub anchors: [Pos2; 2],
    /// Shape spanned by the anchors
    pub shape: Shape,
    /// Constrained variant (square, circle, regular polygon)
    pub alternate: Shape,
    /// Which of the two was selected when the shape was committed
    pub use_alternate: bool,
}
