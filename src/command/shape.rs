use super::{EditorContext, ToolCommand};
use crate::state::ShapeState;
use crate::tools::ShapeKind;

/// A rectangle, ellipse or polygon
#[derive(Debug, Clone)]
pub struct ShapeCommand {
    kind: ShapeKind,
    state: ShapeState,
    saved: Option<ShapeState>,
}

impl ShapeCommand {
    pub fn new(kind: ShapeKind, state: ShapeState) -> Self {
        Self {
            kind,
            state,
            saved: None,
        }
    }
}

impl ToolCommand for ShapeCommand {
    type State = ShapeState;

    fn label(&self) -> &'static str {
        match self.kind {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Polygon => "Polygon",
        }
    }

    fn committed(&self) -> &ShapeState {
        &self.state
    }

    fn saved_slot(&mut self) -> &mut Option<ShapeState> {
        &mut self.saved
    }

    fn capture(&self, ctx: &EditorContext) -> ShapeState {
        ctx.tools.shape(self.kind).snapshot(ctx.colors.pair())
    }

    fn apply(&self, state: &ShapeState, ctx: &mut EditorContext) {
        ctx.tools.shape_mut(self.kind).assign(state);
    }

    /// The variant comes from the committed state, not the live toggle
    fn perform(&self, ctx: &mut EditorContext) {
        let shape = if self.state.use_alternate {
            &self.state.alternate
        } else {
            &self.state.shape
        };
        ctx.tools
            .shape(self.kind)
            .draw_shape(shape, &mut ctx.canvas, &ctx.colors);
    }
}
