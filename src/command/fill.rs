use super::{EditorContext, ToolCommand};
use crate::state::{FillState, Revision};

/// A flood fill, replayed by blitting the patch computed at commit time
#[derive(Debug, Clone)]
pub struct FillCommand {
    state: FillState,
    saved: Option<FillState>,
}

impl FillCommand {
    pub fn new(state: FillState) -> Self {
        Self { state, saved: None }
    }
}

impl ToolCommand for FillCommand {
    type State = FillState;

    fn label(&self) -> &'static str {
        "Fill"
    }

    fn committed(&self) -> &FillState {
        &self.state
    }

    fn saved_slot(&mut self) -> &mut Option<FillState> {
        &mut self.saved
    }

    fn capture(&self, ctx: &EditorContext) -> FillState {
        ctx.tools.fill.snapshot(ctx.colors.pair())
    }

    fn apply(&self, state: &FillState, ctx: &mut EditorContext) {
        if state.revision == Revision::Committed {
            assert!(state.patch.is_some(), "committed fill has no patch");
        }
        ctx.tools.fill.assign(state);
    }

    fn perform(&self, ctx: &mut EditorContext) {
        ctx.tools.fill.draw(&mut ctx.canvas);
    }
}
