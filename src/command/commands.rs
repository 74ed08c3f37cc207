use log::debug;

use super::{
    EditorContext, FillCommand, PathCommand, ResizeCommand, SelectionCommand, ShapeCommand,
    StampCommand, TextCommand, ToolCommand,
};
use crate::color::ColorPair;
use crate::state::ToolState;

/// One replayable edit, as stored in the history
#[derive(Debug, Clone)]
pub enum Command {
    Path(PathCommand),
    Fill(FillCommand),
    Shape(ShapeCommand),
    Stamp(StampCommand),
    Text(TextCommand),
    Selection(SelectionCommand),
    Resize(ResizeCommand),
}

impl Command {
    /// Redraw this edit onto the context's canvas
    pub fn execute(&mut self, ctx: &mut EditorContext) {
        debug!("Executing {}", self.label());
        match self {
            Command::Path(command) => command.execute(ctx),
            Command::Fill(command) => command.execute(ctx),
            Command::Shape(command) => command.execute(ctx),
            Command::Stamp(command) => command.execute(ctx),
            Command::Text(command) => command.execute(ctx),
            Command::Selection(command) => command.execute(ctx),
            Command::Resize(command) => command.execute(ctx),
        }
    }

    /// Checkpoint the canvas after this edit was drawn
    pub fn save_canvas(&self, ctx: &mut EditorContext) -> u64 {
        ctx.save_canvas()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Path(command) => command.label(),
            Command::Fill(command) => command.label(),
            Command::Shape(command) => command.label(),
            Command::Stamp(command) => command.label(),
            Command::Text(command) => command.label(),
            Command::Selection(command) => command.label(),
            Command::Resize(command) => command.label(),
        }
    }

    /// The colors the edit was committed with
    pub fn colors(&self) -> Option<ColorPair> {
        match self {
            Command::Path(command) => Some(command.committed().colors()),
            Command::Fill(command) => Some(command.committed().colors()),
            Command::Shape(command) => Some(command.committed().colors()),
            Command::Stamp(command) => Some(command.committed().colors()),
            Command::Text(command) => Some(command.committed().colors()),
            Command::Selection(command) => Some(command.committed().colors()),
            Command::Resize(_) => None,
        }
    }
}
