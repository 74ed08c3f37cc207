use super::{EditorContext, ToolCommand};
use crate::state::StampState;

#[derive(Debug, Clone)]
pub struct StampCommand {
    state: StampState,
    saved: Option<StampState>,
}

impl StampCommand {
    pub fn new(state: StampState) -> Self {
        Self { state, saved: None }
    }
}

impl ToolCommand for StampCommand {
    type State = StampState;

    fn label(&self) -> &'static str {
        "Stamp"
    }

    fn committed(&self) -> &StampState {
        &self.state
    }

    fn saved_slot(&mut self) -> &mut Option<StampState> {
        &mut self.saved
    }

    fn capture(&self, ctx: &EditorContext) -> StampState {
        ctx.tools.stamp.snapshot(ctx.colors.pair())
    }

    fn apply(&self, state: &StampState, ctx: &mut EditorContext) {
        ctx.tools.stamp.assign(state);
    }

    fn perform(&self, ctx: &mut EditorContext) {
        ctx.tools.stamp.draw(&mut ctx.canvas, &ctx.colors);
    }
}
