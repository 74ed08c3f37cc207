use log::{debug, info};

use super::{Command, EditorContext};
use crate::event::EditorEvent;

/// Ordered log of committed edits with a cursor.
///
/// `cursor` counts the applied commands: `commands[..cursor]` make up the
/// canvas, anything after it has been undone. Appending a command drops the
/// undone tail for good.
#[derive(Debug, Default)]
pub struct CommandHistory {
    commands: Vec<Command>,
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit the tool has already drawn live
    pub fn add_command(&mut self, command: Command) {
        if self.cursor < self.commands.len() {
            debug!(
                "Discarding {} undone commands",
                self.commands.len() - self.cursor
            );
            self.commands.truncate(self.cursor);
        }
        self.commands.push(command);
        self.cursor = self.commands.len();
    }

    /// Step back one edit by rebuilding the canvas from the retained prefix
    pub fn undo(&mut self, ctx: &mut EditorContext) {
        if self.cursor == 0 {
            debug!("Nothing to undo");
            return;
        }
        self.cursor -= 1;
        info!(
            "Undo {} ({} commands replayed)",
            self.commands[self.cursor].label(),
            self.cursor
        );

        ctx.cancel_deferred();
        ctx.canvas.clear();
        ctx.events.emit(EditorEvent::CanvasCleared);
        for command in &mut self.commands[..self.cursor] {
            ctx.flush_deferred();
            command.execute(ctx);
        }
        ctx.flush_deferred();

        ctx.save_canvas();
        self.notify(ctx);
    }

    /// Reapply the next undone edit on top of the current canvas
    pub fn redo(&mut self, ctx: &mut EditorContext) {
        if self.cursor == self.commands.len() {
            debug!("Nothing to redo");
            return;
        }
        ctx.flush_deferred();
        let command = &mut self.commands[self.cursor];
        info!("Redo {}", command.label());
        command.execute(ctx);
        self.cursor += 1;

        ctx.save_canvas();
        self.notify(ctx);
    }

    /// Forget every command; used when a new document is opened
    pub fn clear_history(&mut self) {
        debug!("Clearing {} commands", self.commands.len());
        self.commands.clear();
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.commands.iter().map(Command::label).collect()
    }

    pub fn notify(&self, ctx: &EditorContext) {
        ctx.events.emit(EditorEvent::HistoryChanged {
            cursor: self.cursor,
            len: self.commands.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;
    use crate::command::StampCommand;
    use crate::config::EditorConfig;
    use crate::state::ToolState;

    fn stamp_at(ctx: &EditorContext, x: f32, y: f32) -> Command {
        let mut state = ctx.tools.stamp.snapshot(ctx.colors.pair()).committed();
        state.anchor = Pos2::new(x, y);
        Command::Stamp(StampCommand::new(state))
    }

    #[test]
    fn add_command_truncates_undone_tail() {
        let mut ctx = EditorContext::new(&EditorConfig::default());
        let mut history = CommandHistory::new();
        history.add_command(stamp_at(&ctx, 10.0, 10.0));
        history.add_command(stamp_at(&ctx, 20.0, 20.0));
        history.undo(&mut ctx);
        assert!(history.can_redo());

        history.add_command(stamp_at(&ctx, 30.0, 30.0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn boundaries_are_noops() {
        let mut ctx = EditorContext::new(&EditorConfig::default());
        let mut history = CommandHistory::new();
        let before = ctx.canvas.image().clone();
        history.undo(&mut ctx);
        history.redo(&mut ctx);
        assert_eq!(history.cursor(), 0);
        assert_eq!(ctx.canvas.image(), &before);
    }
}
