//! Per-tool snapshots carried by commands.
//!
//! A snapshot is plain data: the tool's settings struct, the geometry or
//! content of one operation, and the active colors. Snapshots own all of
//! their buffers; nothing in them is shared with the live tool.

use std::fmt;

use crate::color::ColorPair;

mod fill;
mod path;
mod selection;
mod shape;
mod stamp;
mod text;

pub use fill::{FillSettings, FillState, RasterPatch};
pub use path::{PathSettings, PathState};
pub use selection::SelectionState;
pub use shape::{Shape, ShapeSettings, ShapeState};
pub use stamp::{StampSettings, StampState};
pub use text::{TextSettings, TextState};

/// Where a snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// Captured from the live tool right before a replay
    Live,
    /// Built when the operation was committed; the state to apply
    Committed,
}

pub trait ToolState: Clone + PartialEq + fmt::Debug {
    fn revision(&self) -> Revision;

    fn colors(&self) -> ColorPair;

    /// Copy of this snapshot marked as committed
    fn committed(mut self) -> Self
    where
        Self: Sized,
    {
        self.set_revision(Revision::Committed);
        self
    }

    fn set_revision(&mut self, revision: Revision);
}

macro_rules! impl_tool_state {
    ($($state:ty),* $(,)?) => {
        $(
            impl ToolState for $state {
                fn revision(&self) -> Revision {
                    self.revision
                }

                fn colors(&self) -> ColorPair {
                    self.colors
                }

                fn set_revision(&mut self, revision: Revision) {
                    self.revision = revision;
                }
            }
        )*
    };
}

impl_tool_state!(PathState, FillState, ShapeState, StampState, TextState, SelectionState);
