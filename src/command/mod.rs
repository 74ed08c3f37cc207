mod commands;
mod context;
mod fill;
mod history;
mod path;
mod resize;
mod selection;
mod shape;
mod stamp;
mod text;

use crate::state::{Revision, ToolState};

pub use commands::Command;
pub use context::{Deferred, DeferredTask, EditorContext};
pub use fill::FillCommand;
pub use history::CommandHistory;
pub use path::PathCommand;
pub use resize::ResizeCommand;
pub use selection::SelectionCommand;
pub use shape::ShapeCommand;
pub use stamp::StampCommand;
pub use text::TextCommand;

/// Replay lifecycle shared by every tool-backed command.
///
/// A command owns the committed snapshot of one edit. Executing it borrows
/// the live tool from the [`EditorContext`]: the tool's live configuration
/// is saved, the committed snapshot is assigned, the tool draws, and the
/// live configuration is put back. Between `save_state` and `restore_state`
/// nothing else may touch the tool.
pub trait ToolCommand {
    type State: ToolState;

    /// Human readable name for the history list
    fn label(&self) -> &'static str;

    /// The snapshot taken when the edit was committed
    fn committed(&self) -> &Self::State;

    /// Storage for the live snapshot between save and restore
    fn saved_slot(&mut self) -> &mut Option<Self::State>;

    /// Snapshot the tool's live configuration together with the active colors
    fn capture(&self, ctx: &EditorContext) -> Self::State;

    /// Push `state` onto the tool, recomputing any derived state the draw
    /// entry point reads
    fn apply(&self, state: &Self::State, ctx: &mut EditorContext);

    /// Call the tool's draw entry point
    fn perform(&self, ctx: &mut EditorContext);

    fn save_state(&mut self, ctx: &EditorContext) {
        let live = self.capture(ctx);
        *self.saved_slot() = Some(live);
    }

    fn assign_state(&self, ctx: &mut EditorContext) {
        let state = self.committed();
        assert_eq!(
            state.revision(),
            Revision::Committed,
            "{} command holds an uncommitted state",
            self.label()
        );
        ctx.assign_colors(state.colors());
        self.apply(state, ctx);
    }

    fn restore_state(&mut self, ctx: &mut EditorContext) {
        let saved = self
            .saved_slot()
            .take()
            .expect("restore_state called without a matching save_state");
        ctx.assign_colors(saved.colors());
        self.apply(&saved, ctx);
    }

    /// Redraw the committed edit, leaving the live tool as it was
    fn execute(&mut self, ctx: &mut EditorContext) {
        self.save_state(ctx);
        self.assign_state(ctx);
        self.perform(ctx);
        self.restore_state(ctx);
    }
}
