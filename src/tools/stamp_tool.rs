use std::f32::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use egui::{Color32, Pos2, Ui, Vec2};
use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair};
use crate::command::{Command, StampCommand};
use crate::raster;
use crate::state::{Revision, StampSettings, StampState, ToolState};
use crate::tools::Tool;

/// Edge length of the built-in stamp masks
const STAMP_SIZE: u32 = 32;

/// Places one image from the stamp library, tinted with the primary color
#[derive(Debug, Clone)]
pub struct StampTool {
    pub settings: StampSettings,
    anchor: Pos2,
    library: Rc<[RgbaImage]>,
}

impl StampTool {
    pub fn new(settings: StampSettings, library: Vec<RgbaImage>) -> Self {
        assert!(!library.is_empty(), "stamp library must not be empty");
        let mut tool = Self {
            settings: StampSettings::default(),
            anchor: Pos2::ZERO,
            library: library.into(),
        };
        tool.set_settings(settings);
        tool
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// Replace the settings, keeping the image index inside the library
    pub fn set_settings(&mut self, mut settings: StampSettings) {
        settings.image_index = settings.image_index.min(self.library.len() - 1);
        self.settings = settings;
    }

    pub fn snapshot(&self, colors: ColorPair) -> StampState {
        StampState {
            revision: Revision::Live,
            colors,
            settings: self.settings.clone(),
            anchor: self.anchor,
        }
    }

    pub fn assign(&mut self, state: &StampState) {
        assert!(
            state.settings.image_index < self.library.len(),
            "stamp index {} outside a library of {}",
            state.settings.image_index,
            self.library.len()
        );
        self.settings = state.settings.clone();
        self.anchor = state.anchor;
    }

    pub fn draw(&self, canvas: &mut Canvas, colors: &ColorConfig) {
        let stamp = self.placed_image(colors.primary());
        let x = (self.anchor.x - stamp.width() as f32 / 2.0).round() as i64;
        let y = (self.anchor.y - stamp.height() as f32 / 2.0).round() as i64;
        canvas.composite(&stamp, x, y);
    }

    /// The selected mask tinted, rotated and scaled
    fn placed_image(&self, tint: Color32) -> RgbaImage {
        let mask = &self.library[self.settings.image_index];
        let [r, g, b, _] = tint.to_srgba_unmultiplied();
        let mut tinted = mask.clone();
        for pixel in tinted.pixels_mut() {
            let alpha = pixel.0[3];
            *pixel = Rgba([r, g, b, alpha]);
        }
        raster::rotate_scale(&tinted, self.settings.angle, self.settings.scale)
    }
}

/// The built-in stamps: white masks whose alpha carries the shape
pub fn stamp_library() -> Vec<RgbaImage> {
    let size = STAMP_SIZE as f32;
    let center = Pos2::new(size / 2.0, size / 2.0);
    let radius = size / 2.0 - 1.0;
    let white = Color32::WHITE;

    let mut disc = RgbaImage::new(STAMP_SIZE, STAMP_SIZE);
    raster::stamp_disc(&mut disc, center, radius, white);

    let star_points: Vec<Pos2> = (0..10)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * i as f32 / 10.0;
            let r = if i % 2 == 0 { radius } else { radius * 0.45 };
            center + Vec2::angled(angle) * r
        })
        .collect();
    let mut star = RgbaImage::new(STAMP_SIZE, STAMP_SIZE);
    raster::fill_polygon(&mut star, &star_points, white);

    let mut heart = RgbaImage::new(STAMP_SIZE, STAMP_SIZE);
    for y in 0..STAMP_SIZE {
        for x in 0..STAMP_SIZE {
            // (x² + y² − 1)³ − x²y³ ≤ 0, flipped so the point faces down
            let u = (x as f32 + 0.5 - center.x) / (radius * 0.8);
            let v = -(y as f32 + 0.5 - center.y) / (radius * 0.8) + 0.2;
            let a = u * u + v * v - 1.0;
            if a * a * a - u * u * v * v * v <= 0.0 {
                heart.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
    }

    let diamond_points = [
        Pos2::new(center.x, 1.0),
        Pos2::new(size - 1.0, center.y),
        Pos2::new(center.x, size - 1.0),
        Pos2::new(1.0, center.y),
    ];
    let mut diamond = RgbaImage::new(STAMP_SIZE, STAMP_SIZE);
    raster::fill_polygon(&mut diamond, &diamond_points, white);

    vec![star, heart, disc, diamond]
}

impl Tool for StampTool {
    fn name(&self) -> &'static str {
        "Stamp"
    }

    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        self.anchor = pos;
        self.draw(canvas, colors);
        let state = self.snapshot(colors.pair()).committed();
        Some(Command::Stamp(StampCommand::new(state)))
    }

    fn ui(&mut self, ui: &mut Ui, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        ui.horizontal(|ui| {
            ui.label("Stamp:");
            for (index, name) in ["★", "♥", "●", "◆"].iter().enumerate().take(self.library.len()) {
                ui.selectable_value(&mut self.settings.image_index, index, *name);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Angle:");
            ui.drag_angle(&mut self.settings.angle);
        });
        ui.horizontal(|ui| {
            ui.label("Scale:");
            ui.add(egui::Slider::new(&mut self.settings.scale, 0.25..=4.0));
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_masks_are_not_empty() {
        for mask in stamp_library() {
            assert!(mask.pixels().any(|p| p.0[3] == 255));
        }
    }

    #[test]
    #[should_panic(expected = "outside a library")]
    fn assigning_unknown_stamp_panics() {
        let mut tool = StampTool::new(StampSettings::default(), stamp_library());
        let mut state = tool.snapshot(ColorPair::default()).committed();
        state.settings.image_index = 99;
        tool.assign(&state);
    }
}
