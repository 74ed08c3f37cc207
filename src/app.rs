use std::time::Duration;

use egui::{Key, KeyboardShortcut, Modifiers};
use serde::{Deserialize, Serialize};

use crate::color::ColorPair;
use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::file_handler::FileHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tools::ToolSettings;
use crate::util::time::{current_time_secs, secs_until};

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
const SWAP_COLORS: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::X);

/// What survives a restart: tool options and colors, never the history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PersistedSettings {
    pub tools: ToolSettings,
    pub colors: Option<ColorPair>,
}

pub struct PaintApp {
    pub(crate) editor: Editor,
    pub(crate) renderer: Renderer,
    file_handler: FileHandler,
    /// Width/height typed into the canvas size fields
    pub(crate) size_input: [u32; 2],
    /// Last user-facing error, shown in the tools panel
    pub(crate) status: Option<String>,
    pub(crate) pointer_held: bool,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<PersistedSettings>(storage, eframe::APP_KEY) {
                log::info!("Restoring tool settings");
                app.apply_settings(settings);
            }
        }
        app
    }

    /// An app without a window, for headless use
    pub fn with_config(config: EditorConfig) -> Self {
        let size_input = [config.canvas_width, config.canvas_height];
        Self {
            editor: Editor::new(&config),
            renderer: Renderer::new(),
            file_handler: FileHandler::new(),
            size_input,
            status: None,
            pointer_held: false,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn settings(&self) -> PersistedSettings {
        PersistedSettings {
            tools: self.editor.ctx.tools.settings(),
            colors: Some(self.editor.ctx.colors.pair()),
        }
    }

    pub fn apply_settings(&mut self, settings: PersistedSettings) {
        self.editor.ctx.tools.apply_settings(settings.tools);
        if let Some(colors) = settings.colors {
            self.editor.set_colors(colors.primary, colors.secondary);
        }
    }

    pub(crate) fn report<E: std::fmt::Display>(&mut self, err: E) {
        log::error!("{}", err);
        self.status = Some(err.to_string());
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        // consume the shift variant first, plain Ctrl+Z would match it too
        if ctx.input_mut(|i| i.consume_shortcut(&REDO) || i.consume_shortcut(&REDO_ALT)) {
            self.editor.redo();
        } else if ctx.input_mut(|i| i.consume_shortcut(&UNDO)) {
            self.editor.undo();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SWAP_COLORS)) {
            self.editor.swap_colors();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        let result = self.file_handler.take_dropped_image();
        match result.map(|image| image.and_then(|image| self.editor.load_image(image))) {
            Some(Ok(())) => {
                let size = self.editor.ctx.canvas.size();
                self.size_input = [size.width, size.height];
                self.status = None;
            }
            Some(Err(err)) => self.report(err),
            None => {}
        }
    }

    fn run_deferred(&mut self, ctx: &egui::Context) {
        self.editor.run_due_tasks(current_time_secs());
        if let Some(due) = self.editor.ctx.next_task_due() {
            ctx.request_repaint_after(Duration::from_secs_f64(secs_until(due)));
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_deferred(ctx);
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
