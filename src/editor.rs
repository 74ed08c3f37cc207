use egui::{Color32, Pos2, Ui};
use image::RgbaImage;
use log::{debug, info};

use crate::canvas::CanvasSize;
use crate::color::ColorPair;
use crate::command::{Command, CommandHistory, EditorContext, ResizeCommand};
use crate::config::{EditorConfig, validate_canvas_size};
use crate::error::EditorResult;
use crate::event::EditorEvent;
use crate::tools::ToolKind;

/// The editing session: live context, history and the active tool.
///
/// Every committed edit goes through [`Editor::commit`]; pointer input,
/// pending-edit commits and undo/redo run any deferred canvas work first so
/// they always see a settled canvas.
#[derive(Debug)]
pub struct Editor {
    pub ctx: EditorContext,
    history: CommandHistory,
    active: ToolKind,
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            ctx: EditorContext::new(config),
            history: CommandHistory::new(),
            active: ToolKind::Pencil,
        }
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active
    }

    /// Switch tools, committing whatever the old tool still holds
    pub fn select_tool(&mut self, kind: ToolKind) {
        if kind == self.active {
            return;
        }
        self.finish_pending_edit();
        let old = self.active;
        self.active = kind;
        info!("Tool changed: {:?} -> {:?}", old, kind);
        self.ctx.events.emit(EditorEvent::ToolChanged { old, new: kind });
    }

    /// Record an edit that was already drawn live.
    ///
    /// A reload still queued at this point holds the raster the edit was
    /// drawn over, so it is dropped rather than run.
    pub fn commit(&mut self, command: Command) {
        debug!("Committing {}", command.label());
        self.ctx.cancel_deferred();
        command.save_canvas(&mut self.ctx);
        self.history.add_command(command);
        self.history.notify(&self.ctx);
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.ctx.flush_deferred();
        let EditorContext {
            canvas, colors, tools, ..
        } = &mut self.ctx;
        if let Some(command) = tools.get_mut(self.active).on_pointer_down(pos, canvas, colors) {
            self.commit(command);
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.ctx.flush_deferred();
        let EditorContext {
            canvas, colors, tools, ..
        } = &mut self.ctx;
        if let Some(command) = tools.get_mut(self.active).on_pointer_move(pos, canvas, colors) {
            self.commit(command);
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        self.ctx.flush_deferred();
        let EditorContext {
            canvas, colors, tools, ..
        } = &mut self.ctx;
        if let Some(command) = tools.get_mut(self.active).on_pointer_up(pos, canvas, colors) {
            self.commit(command);
        }
    }

    /// Show the active tool's options
    pub fn tool_ui(&mut self, ui: &mut Ui) {
        let EditorContext {
            canvas, colors, tools, ..
        } = &mut self.ctx;
        if let Some(command) = tools.get_mut(self.active).ui(ui, canvas, colors) {
            self.commit(command);
        }
    }

    /// Commit a floating selection, text box or unfinished stroke
    pub fn finish_pending_edit(&mut self) {
        self.ctx.flush_deferred();
        let EditorContext {
            canvas, colors, tools, ..
        } = &mut self.ctx;
        if let Some(command) = tools.get_mut(self.active).deactivate(canvas, colors) {
            self.commit(command);
        }
    }

    pub fn undo(&mut self) {
        self.finish_pending_edit();
        self.history.undo(&mut self.ctx);
    }

    pub fn redo(&mut self) {
        self.finish_pending_edit();
        if self.history.can_redo() {
            self.history.redo(&mut self.ctx);
        }
    }

    pub fn set_colors(&mut self, primary: Color32, secondary: Color32) {
        self.ctx.assign_colors(ColorPair::new(primary, secondary));
    }

    pub fn swap_colors(&mut self) {
        self.ctx.swap_colors();
    }

    /// Resize the canvas live and record it
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> EditorResult<()> {
        validate_canvas_size(width, height)?;
        let before = self.ctx.canvas.size();
        let after = CanvasSize::new(width, height);
        if before == after {
            return Ok(());
        }
        self.finish_pending_edit();
        self.ctx.canvas.resize(width, height);
        self.ctx
            .events
            .emit(EditorEvent::CanvasResized { width, height });
        let source = self.ctx.canvas.image().clone();
        self.commit(Command::Resize(ResizeCommand::new(before, after, source)));
        Ok(())
    }

    /// Start a blank document; history never spans two documents
    pub fn new_canvas(&mut self, width: u32, height: u32) -> EditorResult<()> {
        validate_canvas_size(width, height)?;
        self.discard_pending_edit();
        self.ctx.canvas.start_blank(width, height);
        self.document_replaced();
        Ok(())
    }

    /// Open `image` as a new document
    pub fn load_image(&mut self, image: RgbaImage) -> EditorResult<()> {
        validate_canvas_size(image.width(), image.height())?;
        self.discard_pending_edit();
        self.ctx.canvas.load(image);
        self.document_replaced();
        Ok(())
    }

    /// Run deferred work that is due at `now`
    pub fn run_due_tasks(&mut self, now: f64) -> usize {
        self.ctx.run_due_tasks(now)
    }

    fn discard_pending_edit(&mut self) {
        let EditorContext {
            canvas, colors, tools, ..
        } = &mut self.ctx;
        if let Some(command) = tools.get_mut(self.active).deactivate(canvas, colors) {
            debug!("Dropping pending {} with the old document", command.label());
        }
    }

    fn document_replaced(&mut self) {
        self.ctx.cancel_deferred();
        self.history.clear_history();
        let CanvasSize { width, height } = self.ctx.canvas.size();
        info!("New document {}x{}", width, height);
        self.ctx
            .events
            .emit(EditorEvent::CanvasLoaded { width, height });
        self.ctx.save_canvas();
        self.history.notify(&self.ctx);
    }
}
