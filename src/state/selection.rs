use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;

use super::Revision;
use crate::color::ColorPair;

/// Snapshot of a floating selection.
///
/// `corner`/`width`/`height` describe where the held image is placed now;
/// `shape`/`shape_width`/`shape_height` the canvas region it was lifted from.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub revision: Revision,
    pub colors: ColorPair,
    pub corner: Pos2,
    pub width: f32,
    pub height: f32,
    pub shape: Pos2,
    pub shape_width: f32,
    pub shape_height: f32,
    /// The raster lifted from the canvas or pasted in
    pub image: RgbaImage,
    /// Pasted selections leave no hole behind
    pub is_pasted: bool,
    pub mirror_horizontal: bool,
    pub mirror_vertical: bool,
}

impl SelectionState {
    /// Where the held image lands
    pub fn target_rect(&self) -> Rect {
        Rect::from_min_size(self.corner, Vec2::new(self.width, self.height))
    }

    /// The region the held image was taken from
    pub fn source_rect(&self) -> Rect {
        Rect::from_min_size(self.shape, Vec2::new(self.shape_width, self.shape_height))
    }
}
