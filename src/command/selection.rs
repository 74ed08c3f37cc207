use super::{EditorContext, ToolCommand};
use crate::state::SelectionState;

/// A floating selection put down on the canvas
#[derive(Debug, Clone)]
pub struct SelectionCommand {
    state: SelectionState,
    saved: Option<SelectionState>,
}

impl SelectionCommand {
    pub fn new(state: SelectionState) -> Self {
        Self { state, saved: None }
    }
}

impl ToolCommand for SelectionCommand {
    type State = SelectionState;

    fn label(&self) -> &'static str {
        if self.state.is_pasted { "Paste" } else { "Move selection" }
    }

    fn committed(&self) -> &SelectionState {
        &self.state
    }

    fn saved_slot(&mut self) -> &mut Option<SelectionState> {
        &mut self.saved
    }

    fn capture(&self, ctx: &EditorContext) -> SelectionState {
        ctx.tools.selection.snapshot(ctx.colors.pair())
    }

    fn apply(&self, state: &SelectionState, ctx: &mut EditorContext) {
        ctx.tools.selection.assign(state);
    }

    fn perform(&self, ctx: &mut EditorContext) {
        if !self.state.is_pasted {
            ctx.canvas.fill_rect_background(self.state.source_rect());
        }
        ctx.tools.selection.draw(&mut ctx.canvas);
        ctx.tools.selection.deselect();
    }
}
