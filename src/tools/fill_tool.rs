use egui::{Pos2, Ui};

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair, to_rgba};
use crate::command::{Command, FillCommand};
use crate::raster;
use crate::state::{FillSettings, FillState, RasterPatch, Revision, ToolState};
use crate::tools::Tool;

/// Flood fill. The filled region is computed once, on click, and kept as a
/// finished patch; drawing only ever blits that patch.
#[derive(Debug, Clone)]
pub struct FillTool {
    pub settings: FillSettings,
    patch: Option<RasterPatch>,
}

impl FillTool {
    pub fn new(settings: FillSettings) -> Self {
        Self {
            settings,
            patch: None,
        }
    }

    pub fn patch(&self) -> Option<&RasterPatch> {
        self.patch.as_ref()
    }

    pub fn snapshot(&self, colors: ColorPair) -> FillState {
        FillState {
            revision: Revision::Live,
            colors,
            settings: self.settings.clone(),
            patch: self.patch.clone(),
        }
    }

    pub fn assign(&mut self, state: &FillState) {
        self.settings = state.settings.clone();
        self.patch = state.patch.clone();
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        if let Some(patch) = &self.patch {
            canvas.blit(&patch.image, patch.x, patch.y);
        }
    }

    /// Compute the patch a fill at `pos` would produce on the current canvas.
    /// `None` when the click misses the canvas or the region already has the
    /// fill color.
    pub fn compute_patch(&self, pos: Pos2, canvas: &Canvas, colors: &ColorConfig) -> Option<RasterPatch> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let (x, y) = (pos.x as u32, pos.y as u32);
        let fill = to_rgba(colors.primary());
        if canvas.image().get_pixel_checked(x, y) == Some(&fill) {
            return None;
        }
        let region = raster::flood_region(canvas.image(), x, y, self.settings.tolerance);
        let first = region.first()?;

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.0, first.1, first.0, first.1);
        for &(px, py) in &region {
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
        }

        let mut image =
            image::imageops::crop_imm(canvas.image(), min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
                .to_image();
        for (px, py) in region {
            image.put_pixel(px - min_x, py - min_y, fill);
        }
        log::debug!(
            "Fill patch {}x{} at ({}, {})",
            image.width(),
            image.height(),
            min_x,
            min_y
        );
        Some(RasterPatch {
            x: min_x as i64,
            y: min_y as i64,
            image,
        })
    }
}

impl Tool for FillTool {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        let patch = self.compute_patch(pos, canvas, colors)?;
        self.patch = Some(patch);
        self.draw(canvas);
        let state = self.snapshot(colors.pair()).committed();
        Some(Command::Fill(FillCommand::new(state)))
    }

    fn ui(&mut self, ui: &mut Ui, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        ui.horizontal(|ui| {
            ui.label("Tolerance:");
            ui.add(egui::Slider::new(&mut self.settings.tolerance, 0..=255));
        });
        None
    }
}
