use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Pos2, Rect, Ui, Vec2};
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair};
use crate::command::{Command, ShapeCommand};
use crate::raster;
use crate::state::{Revision, Shape, ShapeSettings, ShapeState, ToolState};
use crate::tools::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Polygon,
}

/// Rectangle, ellipse and regular polygon, dragged out between two anchors.
///
/// Both the free shape and its constrained alternate (square, circle,
/// regular polygon) are kept; `use_alternate` follows the constrain toggle.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ShapeKind,
    pub settings: ShapeSettings,
    pub use_alternate: bool,
    anchors: [Pos2; 2],
    shape: Shape,
    alternate: Shape,
    dragging: bool,
}

impl ShapeTool {
    pub fn new(kind: ShapeKind, settings: ShapeSettings) -> Self {
        Self {
            kind,
            settings,
            use_alternate: false,
            anchors: [Pos2::ZERO; 2],
            shape: Shape::default(),
            alternate: Shape::default(),
            dragging: false,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The shape the live tool would draw right now
    pub fn current(&self) -> &Shape {
        if self.use_alternate {
            &self.alternate
        } else {
            &self.shape
        }
    }

    pub fn snapshot(&self, colors: ColorPair) -> ShapeState {
        ShapeState {
            revision: Revision::Live,
            colors,
            settings: self.settings.clone(),
            anchors: self.anchors,
            shape: self.shape.clone(),
            alternate: self.alternate.clone(),
            use_alternate: self.use_alternate,
        }
    }

    pub fn assign(&mut self, state: &ShapeState) {
        self.settings = state.settings.clone();
        self.anchors = state.anchors;
        self.shape = state.shape.clone();
        self.alternate = state.alternate.clone();
        self.use_alternate = state.use_alternate;
    }

    pub fn draw(&self, canvas: &mut Canvas, colors: &ColorConfig) {
        self.draw_shape(self.current(), canvas, colors);
    }

    /// Render `shape` with the tool's stroke and fill settings
    pub fn draw_shape(&self, shape: &Shape, canvas: &mut Canvas, colors: &ColorConfig) {
        self.render(shape, canvas.image_mut(), colors.pair());
    }

    fn render(&self, shape: &Shape, target: &mut RgbaImage, colors: ColorPair) {
        let width = self.settings.stroke_width;
        match shape {
            Shape::Rectangle(rect) => {
                if self.settings.fill {
                    raster::fill_rect(target, *rect, colors.secondary);
                }
                if self.settings.border {
                    raster::stroke_rect(target, *rect, width, colors.primary);
                }
            }
            Shape::Ellipse { center, radii } => {
                if self.settings.fill {
                    raster::fill_ellipse(target, *center, *radii, colors.secondary);
                }
                if self.settings.border {
                    raster::stroke_ellipse(target, *center, *radii, width, colors.primary);
                }
            }
            Shape::Polygon(points) => {
                if self.settings.fill {
                    raster::fill_polygon(target, points, colors.secondary);
                }
                if self.settings.border {
                    raster::stroke_polygon(target, points, width, colors.primary);
                }
            }
        }
    }

    fn update_shapes(&mut self) {
        let [start, end] = self.anchors;
        let free = Rect::from_two_pos(start, end);
        let delta = end - start;
        let side = delta.x.abs().max(delta.y.abs());
        let constrained = Rect::from_two_pos(
            start,
            start + Vec2::new(side * sign(delta.x), side * sign(delta.y)),
        );
        self.shape = shape_in(self.kind, free, self.settings.sides);
        self.alternate = shape_in(self.kind, constrained, self.settings.sides);
    }

    fn is_degenerate(&self) -> bool {
        let [start, end] = self.anchors;
        (start.x - end.x).abs() < 1.0 && (start.y - end.y).abs() < 1.0
    }

    fn preview(&self, canvas: &mut Canvas, colors: &ColorConfig) {
        canvas.clear_preview();
        self.render(self.current(), canvas.preview_mut(), colors.pair());
    }
}

fn sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// The shape of `kind` inscribed in `bounds`
fn shape_in(kind: ShapeKind, bounds: Rect, sides: u32) -> Shape {
    match kind {
        ShapeKind::Rectangle => Shape::Rectangle(bounds),
        ShapeKind::Ellipse => Shape::Ellipse {
            center: bounds.center(),
            radii: bounds.size() / 2.0,
        },
        ShapeKind::Polygon => {
            let sides = sides.max(3);
            let center = bounds.center();
            let radii = bounds.size() / 2.0;
            let points = (0..sides)
                .map(|i| {
                    let angle = -FRAC_PI_2 + TAU * i as f32 / sides as f32;
                    center + Vec2::new(angle.cos() * radii.x, angle.sin() * radii.y)
                })
                .collect();
            Shape::Polygon(points)
        }
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Polygon => "Polygon",
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        self.dragging = true;
        self.anchors = [pos, pos];
        self.update_shapes();
        canvas.clear_preview();
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if !self.dragging {
            return None;
        }
        self.anchors[1] = pos;
        self.update_shapes();
        self.preview(canvas, colors);
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.anchors[1] = pos;
        self.update_shapes();
        canvas.clear_preview();
        if self.is_degenerate() {
            return None;
        }
        self.draw(canvas, colors);
        let state = self.snapshot(colors.pair()).committed();
        Some(Command::Shape(ShapeCommand::new(self.kind, state)))
    }

    fn ui(&mut self, ui: &mut Ui, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        ui.horizontal(|ui| {
            ui.label("Stroke width:");
            ui.add(egui::Slider::new(&mut self.settings.stroke_width, 1.0..=30.0));
        });
        ui.checkbox(&mut self.settings.border, "Border (primary)");
        ui.checkbox(&mut self.settings.fill, "Fill (secondary)");
        if self.kind == ShapeKind::Polygon {
            ui.horizontal(|ui| {
                ui.label("Sides:");
                ui.add(egui::Slider::new(&mut self.settings.sides, 3..=12));
            });
        }
        ui.checkbox(&mut self.use_alternate, "Constrain proportions");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_rectangle_is_square_in_drag_direction() {
        let mut tool = ShapeTool::new(ShapeKind::Rectangle, ShapeSettings::default());
        tool.anchors = [Pos2::new(10.0, 10.0), Pos2::new(4.0, 30.0)];
        tool.update_shapes();
        assert_eq!(
            tool.alternate,
            Shape::Rectangle(Rect::from_min_max(Pos2::new(-10.0, 10.0), Pos2::new(10.0, 30.0)))
        );
        assert_eq!(
            tool.shape,
            Shape::Rectangle(Rect::from_min_max(Pos2::new(4.0, 10.0), Pos2::new(10.0, 30.0)))
        );
    }

    #[test]
    fn polygon_has_configured_sides() {
        let shape = shape_in(ShapeKind::Polygon, Rect::from_min_size(Pos2::ZERO, Vec2::splat(10.0)), 6);
        match shape {
            Shape::Polygon(points) => assert_eq!(points.len(), 6),
            other => panic!("expected polygon, got {other:?}"),
        }
    }
}
