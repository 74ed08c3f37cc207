use super::{EditorContext, ToolCommand};
use crate::state::PathState;
use crate::tools::PathKind;

/// A pencil, eraser or spray stroke
#[derive(Debug, Clone)]
pub struct PathCommand {
    kind: PathKind,
    state: PathState,
    saved: Option<PathState>,
}

impl PathCommand {
    pub fn new(kind: PathKind, state: PathState) -> Self {
        Self {
            kind,
            state,
            saved: None,
        }
    }
}

impl ToolCommand for PathCommand {
    type State = PathState;

    fn label(&self) -> &'static str {
        match self.kind {
            PathKind::Pencil => "Pencil stroke",
            PathKind::Eraser => "Erase",
            PathKind::Spray => "Spray",
        }
    }

    fn committed(&self) -> &PathState {
        &self.state
    }

    fn saved_slot(&mut self) -> &mut Option<PathState> {
        &mut self.saved
    }

    fn capture(&self, ctx: &EditorContext) -> PathState {
        ctx.tools.path(self.kind).snapshot(ctx.colors.pair())
    }

    fn apply(&self, state: &PathState, ctx: &mut EditorContext) {
        ctx.tools.path_mut(self.kind).assign(state);
    }

    fn perform(&self, ctx: &mut EditorContext) {
        // leftover preview pixels from a live stroke must not mix into the replay
        ctx.canvas.clear_preview();
        ctx.tools.path(self.kind).draw(&mut ctx.canvas, &ctx.colors);
        ctx.canvas.clear_preview();
    }
}
