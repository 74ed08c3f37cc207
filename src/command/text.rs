use super::{EditorContext, ToolCommand};
use crate::state::TextState;

#[derive(Debug, Clone)]
pub struct TextCommand {
    state: TextState,
    saved: Option<TextState>,
}

impl TextCommand {
    pub fn new(state: TextState) -> Self {
        Self { state, saved: None }
    }
}

impl ToolCommand for TextCommand {
    type State = TextState;

    fn label(&self) -> &'static str {
        "Text"
    }

    fn committed(&self) -> &TextState {
        &self.state
    }

    fn saved_slot(&mut self) -> &mut Option<TextState> {
        &mut self.saved
    }

    fn capture(&self, ctx: &EditorContext) -> TextState {
        ctx.tools.text.snapshot(ctx.colors.pair())
    }

    fn apply(&self, state: &TextState, ctx: &mut EditorContext) {
        ctx.tools.text.assign(state);
    }

    fn perform(&self, ctx: &mut EditorContext) {
        ctx.tools.text.draw(&mut ctx.canvas, &ctx.colors);
    }
}
