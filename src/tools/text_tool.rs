use ab_glyph::{Font, FontRef, PxScale, ScaleFont, point};
use egui::{Color32, Pos2, Rect, Ui, Vec2};
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::color::{ColorConfig, ColorPair, to_rgba};
use crate::command::{Command, TextCommand};
use crate::raster;
use crate::state::{Revision, TextSettings, TextState, ToolState};
use crate::tools::Tool;

/// Coverage above which a glyph pixel is painted
const COVERAGE_THRESHOLD: f32 = 0.5;

/// Places a single line of text.
///
/// `editor_value` and `display_width` mirror the on-screen text box; they
/// are what the options panel shows and edits, while `text`/`width` are the
/// last placed run.
#[derive(Debug, Clone)]
pub struct TextTool {
    pub settings: TextSettings,
    text: String,
    origin: Pos2,
    width: f32,
    editor_value: String,
    display_width: f32,
    editing: bool,
    font: FontRef<'static>,
}

impl TextTool {
    pub fn new(settings: TextSettings) -> Self {
        let font = FontRef::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT)
            .expect("the bundled egui font parses");
        Self {
            settings,
            text: String::new(),
            origin: Pos2::ZERO,
            width: 0.0,
            editor_value: String::new(),
            display_width: 0.0,
            editing: false,
            font,
        }
    }

    pub fn editor_value(&self) -> &str {
        &self.editor_value
    }

    pub fn display_width(&self) -> f32 {
        self.display_width
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Open the text box at `origin` with `value` typed into it
    pub fn begin_editing(&mut self, origin: Pos2, value: &str) {
        self.origin = origin;
        self.editor_value = value.to_owned();
        self.display_width = self.measure(value);
        self.editing = true;
    }

    pub fn snapshot(&self, colors: ColorPair) -> TextState {
        TextState {
            revision: Revision::Live,
            colors,
            settings: self.settings.clone(),
            text: self.text.clone(),
            origin: self.origin,
            width: self.width,
            editor_value: self.editor_value.clone(),
            display_width: self.display_width,
        }
    }

    /// Load a snapshot. A committed run also becomes the text box content,
    /// so widgets reading the display width see the replayed run.
    pub fn assign(&mut self, state: &TextState) {
        self.settings = state.settings.clone();
        self.text = state.text.clone();
        self.origin = state.origin;
        self.width = state.width;
        match state.revision {
            Revision::Committed => {
                self.editor_value = state.text.clone();
                self.display_width = state.width;
            }
            Revision::Live => {
                self.editor_value = state.editor_value.clone();
                self.display_width = state.display_width;
            }
        }
    }

    /// Advance width of `text` with the current typography
    pub fn measure(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(self.settings.font_size));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = self.font.glyph_id(c);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        if self.settings.bold && !text.is_empty() {
            width += 1.0;
        }
        width
    }

    pub fn draw(&self, canvas: &mut Canvas, colors: &ColorConfig) {
        self.render(&self.text, canvas.image_mut(), colors.primary());
    }

    fn render(&self, text: &str, target: &mut RgbaImage, color: Color32) {
        let pixel = to_rgba(color);
        let scale = PxScale::from(self.settings.font_size);
        let scaled = self.font.as_scaled(scale);
        let baseline = self.origin.y + scaled.ascent();
        let mut caret = self.origin.x;
        let mut previous = None;

        for c in text.chars() {
            let id = self.font.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
                outlined.draw(|x, y, coverage| {
                    if coverage >= COVERAGE_THRESHOLD {
                        raster::put(target, left + x as i64, top + y as i64, pixel);
                        if self.settings.bold {
                            raster::put(target, left + x as i64 + 1, top + y as i64, pixel);
                        }
                    }
                });
            }
        }

        if self.settings.underline && !text.is_empty() {
            let thickness = (self.settings.font_size / 16.0).max(1.0);
            let underline = Rect::from_min_size(
                Pos2::new(self.origin.x, baseline + thickness * 2.0),
                Vec2::new(self.measure(text), thickness),
            );
            raster::fill_rect(target, underline, color);
        }
    }

    fn preview(&self, canvas: &mut Canvas, colors: &ColorConfig) {
        canvas.clear_preview();
        self.render(&self.editor_value, canvas.preview_mut(), colors.primary());
    }

    /// Place the text box content on the canvas
    pub fn commit(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if !self.editing {
            return None;
        }
        self.editing = false;
        canvas.clear_preview();
        if self.editor_value.is_empty() {
            return None;
        }
        self.text = self.editor_value.clone();
        self.width = self.measure(&self.text);
        self.display_width = self.width;
        self.draw(canvas, colors);
        let state = self.snapshot(colors.pair()).committed();
        Some(Command::Text(TextCommand::new(state)))
    }
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        if self.editing {
            return self.commit(canvas, colors);
        }
        self.begin_editing(pos, "");
        None
    }

    fn deactivate(&mut self, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        self.commit(canvas, colors)
    }

    fn ui(&mut self, ui: &mut Ui, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command> {
        ui.horizontal(|ui| {
            ui.label("Size:");
            ui.add(egui::Slider::new(&mut self.settings.font_size, 8.0..=96.0));
        });
        ui.checkbox(&mut self.settings.bold, "Bold");
        ui.checkbox(&mut self.settings.underline, "Underline");

        if !self.editing {
            ui.label("Click on the canvas to place a text box.");
            return None;
        }

        let response = ui.text_edit_singleline(&mut self.editor_value);
        self.display_width = self.measure(&self.editor_value);
        ui.label(format!("Width: {:.0}px", self.display_width));
        self.preview(canvas, colors);

        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Place text").clicked() || submitted {
            return self.commit(canvas, colors);
        }
        None
    }
}
