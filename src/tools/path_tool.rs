use egui::{Color32, Pos2, Ui, Vec2};
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair};
use crate::command::{Command, PathCommand};
use crate::raster;
use crate::state::{PathSettings, PathState, Revision, ToolState};
use crate::tools::Tool;

/// The freehand tools sharing one implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Pencil,
    Eraser,
    Spray,
}

/// Pencil, eraser and spray.
///
/// `points` is the working set a stroke accumulates into and `draw` renders;
/// `path` is the finalized list of the last committed stroke.
#[derive(Debug, Clone)]
pub struct PathTool {
    kind: PathKind,
    pub settings: PathSettings,
    points: Vec<Pos2>,
    path: Vec<Pos2>,
    drawing: bool,
}

impl PathTool {
    pub fn new(kind: PathKind, settings: PathSettings) -> Self {
        Self {
            kind,
            settings,
            points: Vec::new(),
            path: Vec::new(),
            drawing: false,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn path(&self) -> &[Pos2] {
        &self.path
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Capture the live configuration
    pub fn snapshot(&self, colors: ColorPair) -> PathState {
        PathState {
            revision: Revision::Live,
            colors,
            settings: self.settings.clone(),
            points: self.points.clone(),
            path: self.path.clone(),
        }
    }

    /// Load a snapshot. Committed snapshots rebuild the working set from the
    /// finalized path so the replay draws exactly the committed stroke.
    pub fn assign(&mut self, state: &PathState) {
        self.settings = state.settings.clone();
        self.path = state.path.clone();
        self.points = match state.revision {
            Revision::Committed => state.path.clone(),
            Revision::Live => state.points.clone(),
        };
    }

    /// Render the working set onto the canvas
    pub fn draw(&self, canvas: &mut Canvas, colors: &ColorConfig) {
        let color = self.ink(canvas, colors);
        self.render(canvas.image_mut(), &self.points, color);
    }

    fn ink(&self, canvas: &Canvas, colors: &ColorConfig) -> Color32 {
        match self.kind {
            PathKind::Eraser => canvas.background(),
            PathKind::Pencil | PathKind::Spray => colors.primary(),
        }
    }

    fn render(&self, target: &mut RgbaImage, points: &[Pos2], color: Color32) {
        match self.kind {
            PathKind::Pencil | PathKind::Eraser => {
                raster::stroke_polyline(target, points, self.settings.thickness, color);
            }
            PathKind::Spray => {
                for (index, point) in points.iter().enumerate() {
                    for dot in 0..self.settings.density {
                        let offset = spray_offset(index as u64, dot as u64, self.settings.thickness);
                        raster::stamp_disc(target, *point + offset, 0.5, color);
                    }
                }
            }
        }
    }

    fn commit(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        self.drawing = false;
        canvas.clear_preview();
        if self.points.is_empty() {
            return None;
        }
        self.path = self.points.clone();
        self.draw(canvas, colors);
        let state = self.snapshot(colors.pair()).committed();
        Some(Command::Path(PathCommand::new(self.kind, state)))
    }
}

/// Deterministic scatter of one spray dot inside a disc of `diameter`
fn spray_offset(point: u64, dot: u64, diameter: f32) -> Vec2 {
    let hash = splitmix(point.wrapping_mul(0x9E37_79B9) ^ dot);
    let angle = (hash & 0xFFFF) as f32 / 65536.0 * std::f32::consts::TAU;
    let distance = ((hash >> 16) & 0xFFFF) as f32 / 65536.0;
    Vec2::angled(angle) * distance.sqrt() * diameter / 2.0
}

fn splitmix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

impl Tool for PathTool {
    fn name(&self) -> &'static str {
        match self.kind {
            PathKind::Pencil => "Pencil",
            PathKind::Eraser => "Eraser",
            PathKind::Spray => "Spray",
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        self.drawing = true;
        self.points = vec![pos];
        canvas.clear_preview();
        let color = self.ink(canvas, colors);
        self.render(canvas.preview_mut(), &[pos], color);
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if !self.drawing || self.points.last() == Some(&pos) {
            return None;
        }
        self.points.push(pos);
        let color = self.ink(canvas, colors);
        // Only the newest segment needs to go onto the preview
        let tail = &self.points[self.points.len() - 2..];
        match self.kind {
            PathKind::Spray => self.render(canvas.preview_mut(), &self.points, color),
            _ => self.render(canvas.preview_mut(), tail, color),
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if !self.drawing {
            return None;
        }
        if self.points.last() != Some(&pos) {
            self.points.push(pos);
        }
        self.commit(canvas, colors)
    }

    fn deactivate(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if self.drawing {
            self.commit(canvas, colors)
        } else {
            None
        }
    }

    fn ui(&mut self, ui: &mut Ui, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        ui.horizontal(|ui| {
            ui.label("Thickness:");
            ui.add(egui::Slider::new(&mut self.settings.thickness, 1.0..=50.0));
        });
        if self.kind == PathKind::Spray {
            ui.horizontal(|ui| {
                ui.label("Density:");
                ui.add(egui::Slider::new(&mut self.settings.density, 1..=64));
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_snapshot_rehydrates_working_points() {
        let mut tool = PathTool::new(PathKind::Pencil, PathSettings::default());
        let state = PathState {
            revision: Revision::Committed,
            colors: ColorPair::default(),
            settings: PathSettings { thickness: 9.0, density: 1 },
            points: Vec::new(),
            path: vec![Pos2::new(1.0, 1.0), Pos2::new(5.0, 5.0)],
        };
        tool.assign(&state);
        assert_eq!(tool.points(), state.path.as_slice());
        assert_eq!(tool.settings.thickness, 9.0);
    }

    #[test]
    fn releasing_the_pointer_finalizes_the_stroke() {
        let mut canvas = Canvas::new(20, 20, Color32::WHITE);
        let colors = ColorConfig::new(ColorPair::new(Color32::BLACK, Color32::WHITE));
        let mut tool = PathTool::new(PathKind::Pencil, PathSettings::default());

        tool.on_pointer_down(Pos2::new(2.0, 2.0), &mut canvas, &colors);
        tool.on_pointer_move(Pos2::new(10.0, 2.0), &mut canvas, &colors);
        assert!(tool.is_drawing());
        assert!(tool.path().is_empty());

        let command = tool.on_pointer_up(Pos2::new(10.0, 12.0), &mut canvas, &colors);
        assert!(matches!(command, Some(Command::Path(_))));
        assert!(!tool.is_drawing());
        assert_eq!(tool.path().len(), 3);
        assert_eq!(canvas.pixel(6, 2), Some(Color32::BLACK));
    }

    #[test]
    fn spray_scatter_is_repeatable_and_bounded() {
        for dot in 0..32 {
            let a = spray_offset(3, dot, 10.0);
            assert_eq!(a, spray_offset(3, dot, 10.0));
            assert!(a.length() <= 5.0);
        }
    }
}
