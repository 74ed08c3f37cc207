use image::RgbaImage;
use log::debug;

use super::{DeferredTask, EditorContext};
use crate::canvas::CanvasSize;
use crate::event::EditorEvent;

/// A change of canvas dimensions.
///
/// Not tool backed: replaying it resizes the canvas right away and reloads
/// the raster captured after the live resize once the canvas has settled.
#[derive(Debug, Clone)]
pub struct ResizeCommand {
    before: CanvasSize,
    after: CanvasSize,
    source: RgbaImage,
}

impl ResizeCommand {
    pub fn new(before: CanvasSize, after: CanvasSize, source: RgbaImage) -> Self {
        assert_eq!(
            source.dimensions(),
            (after.width, after.height),
            "resize source does not match the new canvas size"
        );
        Self {
            before,
            after,
            source,
        }
    }

    pub fn before(&self) -> CanvasSize {
        self.before
    }

    pub fn after(&self) -> CanvasSize {
        self.after
    }

    pub fn label(&self) -> &'static str {
        "Resize canvas"
    }

    pub fn execute(&mut self, ctx: &mut EditorContext) {
        debug!(
            "Resizing {}x{} -> {}x{}",
            self.before.width, self.before.height, self.after.width, self.after.height
        );
        ctx.canvas.resize(self.after.width, self.after.height);
        ctx.events.emit(EditorEvent::CanvasResized {
            width: self.after.width,
            height: self.after.height,
        });
        let delay = ctx.resize_settle_secs();
        ctx.schedule(delay, DeferredTask::ReloadRaster(self.source.clone()));
    }
}
