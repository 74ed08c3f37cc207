use egui::{Color32, Pos2, Rect, Ui, Vec2};
use image::{RgbaImage, imageops};
use log::{debug, info};

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair};
use crate::command::{Command, SelectionCommand};
use crate::raster;
use crate::state::{Revision, SelectionState, ToolState};
use crate::tools::Tool;

/// Hit radius of the bottom-right resize handle
pub const RESIZE_HANDLE_RADIUS: f32 = 8.0;

const OUTLINE_COLOR: Color32 = Color32::from_rgb(30, 120, 255);

/// What the pointer is currently doing with the selection
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    None,
    Selecting { start: Pos2 },
    Moving { offset: Vec2 },
    Resizing,
}

/// Rectangular selection that lifts pixels off the canvas and lets them be
/// moved, resized and mirrored before they are put back down.
#[derive(Debug, Clone)]
pub struct SelectionTool {
    pub magnetism: bool,
    magnet_distance: f32,
    corner: Pos2,
    width: f32,
    height: f32,
    shape: Pos2,
    shape_width: f32,
    shape_height: f32,
    image: RgbaImage,
    is_pasted: bool,
    mirror_horizontal: bool,
    mirror_vertical: bool,
    is_selected: bool,
    clipboard: Option<RgbaImage>,
    drag: Drag,
}

impl SelectionTool {
    pub fn new(magnet_distance: f32) -> Self {
        Self {
            magnetism: true,
            magnet_distance,
            corner: Pos2::ZERO,
            width: 0.0,
            height: 0.0,
            shape: Pos2::ZERO,
            shape_width: 0.0,
            shape_height: 0.0,
            image: RgbaImage::new(0, 0),
            is_pasted: false,
            mirror_horizontal: false,
            mirror_vertical: false,
            is_selected: false,
            clipboard: None,
            drag: Drag::None,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn corner(&self) -> Pos2 {
        self.corner
    }

    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn target_rect(&self) -> Rect {
        Rect::from_min_size(self.corner, self.dimensions())
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub fn snapshot(&self, colors: ColorPair) -> SelectionState {
        SelectionState {
            revision: Revision::Live,
            colors,
            corner: self.corner,
            width: self.width,
            height: self.height,
            shape: self.shape,
            shape_width: self.shape_width,
            shape_height: self.shape_height,
            image: self.image.clone(),
            is_pasted: self.is_pasted,
            mirror_horizontal: self.mirror_horizontal,
            mirror_vertical: self.mirror_vertical,
        }
    }

    pub fn assign(&mut self, state: &SelectionState) {
        self.corner = state.corner;
        self.width = state.width;
        self.height = state.height;
        self.shape = state.shape;
        self.shape_width = state.shape_width;
        self.shape_height = state.shape_height;
        self.image = state.image.clone();
        self.is_pasted = state.is_pasted;
        self.mirror_horizontal = state.mirror_horizontal;
        self.mirror_vertical = state.mirror_vertical;
    }

    /// Composite the held image at the current corner and dimensions
    pub fn draw(&self, canvas: &mut Canvas) {
        let placed = self.placed_image();
        canvas.composite(&placed, self.corner.x.round() as i64, self.corner.y.round() as i64);
    }

    /// Put the selection down for good
    pub fn deselect(&mut self) {
        self.is_selected = false;
        self.drag = Drag::None;
    }

    /// The held image with mirroring and scaling applied
    fn placed_image(&self) -> RgbaImage {
        let mut placed = self.image.clone();
        if self.mirror_horizontal {
            imageops::flip_horizontal_in_place(&mut placed);
        }
        if self.mirror_vertical {
            imageops::flip_vertical_in_place(&mut placed);
        }
        let width = self.width.round().max(1.0) as u32;
        let height = self.height.round().max(1.0) as u32;
        if placed.dimensions() != (width, height) && !placed.is_empty() {
            placed = imageops::resize(&placed, width, height, imageops::FilterType::Nearest);
        }
        placed
    }

    /// Lift the pixels under `rect` into a floating selection
    pub fn lift(&mut self, rect: Rect, canvas: &mut Canvas) -> bool {
        let rect = Rect::from_min_max(rect.min.round(), rect.max.round()).intersect(canvas.rect());
        let image = canvas.crop(rect);
        if image.width() == 0 || image.height() == 0 {
            return false;
        }
        let (width, height) = (image.width() as f32, image.height() as f32);
        self.image = image;
        self.shape = rect.min;
        self.shape_width = width;
        self.shape_height = height;
        self.corner = rect.min;
        self.width = width;
        self.height = height;
        self.is_pasted = false;
        self.mirror_horizontal = false;
        self.mirror_vertical = false;
        self.is_selected = true;
        canvas.fill_rect_background(self.snapshot(ColorPair::default()).source_rect());
        self.render_preview(canvas);
        info!("Selected {}x{} at {:?}", width, height, rect.min);
        true
    }

    /// Float the clipboard image at the top-left of the canvas
    pub fn paste(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        let image = self.clipboard.clone()?;
        let committed = self.commit(canvas, colors);
        let (width, height) = (image.width() as f32, image.height() as f32);
        self.image = image;
        self.corner = Pos2::ZERO;
        self.width = width;
        self.height = height;
        self.shape = Pos2::ZERO;
        self.shape_width = width;
        self.shape_height = height;
        self.is_pasted = true;
        self.mirror_horizontal = false;
        self.mirror_vertical = false;
        self.is_selected = true;
        self.render_preview(canvas);
        committed
    }

    pub fn copy(&mut self) {
        if self.is_selected {
            self.clipboard = Some(self.placed_image());
        }
    }

    pub fn toggle_mirror(&mut self, horizontal: bool, canvas: &mut Canvas) {
        if horizontal {
            self.mirror_horizontal = !self.mirror_horizontal;
        } else {
            self.mirror_vertical = !self.mirror_vertical;
        }
        self.render_preview(canvas);
    }

    /// Composite the floating selection and record it
    pub fn commit(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if !self.is_selected {
            return None;
        }
        canvas.clear_preview();
        self.draw(canvas);
        self.deselect();
        let state = self.snapshot(colors.pair()).committed();
        Some(Command::Selection(SelectionCommand::new(state)))
    }

    /// Snap the corner to the canvas edges when it is within the magnet distance
    fn magnetize(&self, corner: Pos2, canvas: &Canvas) -> Pos2 {
        if !self.magnetism {
            return corner;
        }
        let snap = |value: f32, extent: f32, limit: f32| {
            if value.abs() <= self.magnet_distance {
                0.0
            } else if (value + extent - limit).abs() <= self.magnet_distance {
                limit - extent
            } else {
                value
            }
        };
        Pos2::new(
            snap(corner.x, self.width, canvas.width() as f32),
            snap(corner.y, self.height, canvas.height() as f32),
        )
    }

    /// Whether `pos` grabs the bottom-right resize handle
    pub fn on_handle(&self, pos: Pos2) -> bool {
        self.is_selected && pos.distance(self.target_rect().right_bottom()) <= RESIZE_HANDLE_RADIUS
    }

    fn render_preview(&self, canvas: &mut Canvas) {
        canvas.clear_preview();
        if !self.is_selected {
            return;
        }
        let placed = self.placed_image();
        let preview = canvas.preview_mut();
        imageops::overlay(preview, &placed, self.corner.x.round() as i64, self.corner.y.round() as i64);
        raster::stroke_rect(preview, self.target_rect(), 1.0, OUTLINE_COLOR);
        raster::fill_rect(
            preview,
            Rect::from_center_size(self.target_rect().right_bottom(), Vec2::splat(RESIZE_HANDLE_RADIUS)),
            OUTLINE_COLOR,
        );
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if self.is_selected {
            if self.on_handle(pos) {
                self.drag = Drag::Resizing;
                return None;
            }
            if self.target_rect().contains(pos) {
                self.drag = Drag::Moving {
                    offset: pos - self.corner,
                };
                return None;
            }
            debug!("Click outside the selection, committing it");
            let committed = self.commit(canvas, colors);
            self.drag = Drag::Selecting { start: pos };
            return committed;
        }
        self.drag = Drag::Selecting { start: pos };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        match self.drag {
            Drag::None => {}
            Drag::Selecting { start } => {
                canvas.clear_preview();
                raster::stroke_rect(canvas.preview_mut(), Rect::from_two_pos(start, pos), 1.0, OUTLINE_COLOR);
            }
            Drag::Moving { offset } => {
                self.corner = self.magnetize(pos - offset, canvas);
                self.render_preview(canvas);
            }
            Drag::Resizing => {
                self.width = (pos.x - self.corner.x).max(1.0);
                self.height = (pos.y - self.corner.y).max(1.0);
                self.render_preview(canvas);
            }
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        if let Drag::Selecting { start } = self.drag {
            canvas.clear_preview();
            self.lift(Rect::from_two_pos(start, pos), canvas);
        }
        self.drag = Drag::None;
        None
    }

    fn deactivate(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        self.commit(canvas, colors)
    }

    fn ui(&mut self, ui: &mut Ui, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        let mut command = None;
        ui.checkbox(&mut self.magnetism, "Snap to canvas edges");
        ui.add_enabled_ui(self.is_selected, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Mirror ↔").clicked() {
                    self.toggle_mirror(true, canvas);
                }
                if ui.button("Mirror ↕").clicked() {
                    self.toggle_mirror(false, canvas);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Copy").clicked() {
                    self.copy();
                }
                if ui.button("Apply").clicked() {
                    command = self.commit(canvas, colors);
                }
            });
        });
        if ui.add_enabled(self.has_clipboard(), egui::Button::new("Paste")).clicked() {
            command = self.paste(canvas, colors);
        }
        if self.is_selected {
            ui.label(format!(
                "{:.0}x{:.0} at ({:.0}, {:.0})",
                self.width, self.height, self.corner.x, self.corner.y
            ));
        }
        command
    }
}
