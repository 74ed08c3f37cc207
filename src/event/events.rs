use egui::Color32;

use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The active color pair changed, live or during replay
    ColorsChanged {
        primary: Color32,
        secondary: Color32,
    },
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    HistoryChanged {
        cursor: usize,
        len: usize,
    },
    CanvasSaved {
        checkpoint: u64,
    },
    CanvasCleared,
    CanvasResized {
        width: u32,
        height: u32,
    },
    /// A new document replaced the canvas
    CanvasLoaded {
        width: u32,
        height: u32,
    },
}
